use std::ops::Range;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::{hash::Fnv1a, parse::parse_tenths, table::PartitionTable};

/// Scans the records in `data[range]` into a fresh partition table sized for
/// `expected_stations` distinct names.
///
/// `range` must be line-aligned (see [`crate::chunk::split`]). The scan never
/// reads outside it; a final record without a trailing newline is accepted.
/// Any malformed record aborts the scan.
pub fn scan(
    data: &[u8],
    range: Range<usize>,
    expected_stations: usize,
) -> Result<PartitionTable<'_>> {
    let mut table = PartitionTable::for_cardinality(expected_stations)?;
    let end = range.end;
    let mut pos = range.start;
    let mut records = 0u64;

    while pos < end {
        let line_start = pos;

        // Hash the name while looking for its delimiter.
        let mut hasher = Fnv1a::new();
        loop {
            if pos == end || data[pos] == b'\n' {
                bail!("missing ';' delimiter in record at byte {line_start}");
            }
            let b = data[pos];
            if b == b';' {
                break;
            }
            hasher.write_byte(b);
            pos += 1;
        }
        let name = &data[line_start..pos];
        pos += 1;

        let field_start = pos;
        while pos < end && data[pos] != b'\n' {
            pos += 1;
        }
        let reading = parse_tenths(&data[field_start..pos])
            .with_context(|| format!("malformed record at byte {line_start}"))?;

        table.insert_or_update(name, hasher.finish(), reading)?;
        records += 1;

        // Skip the newline.
        pos += 1;
    }

    debug!(
        start = range.start,
        end,
        records,
        stations = table.len(),
        "finished chunk"
    );
    Ok(table)
}
