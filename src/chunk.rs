use std::ops::Range;

use memchr::memchr;
use tracing::debug;

/// How far past an even split point we look for a newline before giving up
/// and scanning the rest of the input.
const SNAP_WINDOW: usize = 64;

/// Splits `data` into `workers` contiguous, line-aligned ranges.
///
/// The ranges cover `0..data.len()` exactly once and every range except the
/// last ends one past a `\n`. When the input has fewer lines than workers some
/// ranges are empty.
pub fn split(data: &[u8], workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let len = data.len();
    let target = len / workers;

    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 1..workers {
        let end = snap_to_line(data, (i * target).max(start));
        chunks.push(start..end);
        start = end;
    }
    chunks.push(start..len);
    chunks
}

/// First line start at or after `pos`, or `data.len()` if there is none.
fn snap_to_line(data: &[u8], pos: usize) -> usize {
    if pos == 0 || pos >= data.len() {
        return pos.min(data.len());
    }
    // Already sitting on a line start.
    if data[pos - 1] == b'\n' {
        return pos;
    }

    let window_end = (pos + SNAP_WINDOW).min(data.len());
    if let Some(i) = memchr(b'\n', &data[pos..window_end]) {
        return pos + i + 1;
    }

    debug!(pos, "no newline within {SNAP_WINDOW} bytes of split point, scanning ahead");
    match memchr(b'\n', &data[window_end..]) {
        Some(i) => window_end + i + 1,
        None => data.len(),
    }
}
