use std::{num::NonZeroUsize, path::Path, thread};

use anyhow::{ensure, Context, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    chunk,
    input::MappedInput,
    merge::{merge, Aggregate},
    worker,
};

/// The challenge caps the number of distinct stations at 10 000.
pub const DEFAULT_EXPECTED_STATIONS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    /// Number of scan workers, and therefore chunks.
    pub workers: usize,
    /// Distinct station names each worker's table must hold.
    pub expected_stations: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            expected_stations: DEFAULT_EXPECTED_STATIONS,
        }
    }
}

/// Hardware parallelism, or a single worker when it can't be determined.
pub fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Number of workers actually started for a request of `requested`: never more
/// than the hardware parallelism.
pub fn effective_workers(requested: usize) -> usize {
    let available = default_workers();
    if requested > available {
        debug!(requested, available, "capping worker count at available parallelism");
    }
    requested.min(available)
}

/// Aggregates every record in `data`.
///
/// The input is split into one line-aligned chunk per worker and each chunk is
/// scanned on a dedicated pool of `options.workers` threads, capped at the
/// hardware parallelism. The partitions are then merged on the calling thread.
pub fn aggregate(data: &[u8], options: &ScanOptions) -> Result<Aggregate> {
    ensure!(options.workers > 0, "worker count must be at least 1");
    ensure!(options.expected_stations > 0, "expected station count must be at least 1");
    let workers = effective_workers(options.workers);

    let chunks = chunk::split(data, workers);
    debug!(len = data.len(), ?chunks, "split input");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("scan-{i}"))
        .build()
        .context("couldn't start scan workers")?;

    let partitions = pool.install(|| {
        chunks
            .into_par_iter()
            .map(|range| worker::scan(data, range, options.expected_stations))
            .collect::<Result<Vec<_>>>()
    })?;

    merge(partitions, options.expected_stations)
}

/// Maps the file at `path` and aggregates it.
pub fn aggregate_file(path: impl AsRef<Path>, options: &ScanOptions) -> Result<Aggregate> {
    let input = MappedInput::open(path)?;
    debug!(len = input.len(), "mapped input");
    aggregate(&input, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(workers: usize) -> ScanOptions {
        ScanOptions {
            workers,
            expected_stations: 64,
        }
    }

    #[test]
    fn rejects_zero_workers() {
        assert!(aggregate(b"a;1.0\n", &options(0)).is_err());
    }

    #[test]
    fn rejects_zero_stations() {
        let opts = ScanOptions {
            workers: 1,
            expected_stations: 0,
        };
        assert!(aggregate(b"a;1.0\n", &opts).is_err());
    }

    #[test]
    fn worker_count_does_not_change_result() {
        let data: Vec<u8> = (0..500)
            .flat_map(|i| format!("s{};{}.{}\n", i % 23, (i * 7) % 60 - 20, i % 10).into_bytes())
            .collect();
        let single = aggregate(&data, &options(1)).unwrap();
        assert_eq!(single.len(), 23);
        for workers in [2, 3, 8, 16] {
            assert_eq!(aggregate(&data, &options(workers)).unwrap(), single, "{workers} workers");
        }
    }

    #[test]
    fn worker_count_is_capped_at_parallelism() {
        let available = default_workers();
        assert_eq!(effective_workers(available * 64), available);
        assert_eq!(effective_workers(available + 1), available);
        assert_eq!(effective_workers(1), 1);

        let data = b"a;1.0\nb;2.0\na;3.0\n";
        let oversubscribed = aggregate(data, &options(available * 64)).unwrap();
        assert_eq!(oversubscribed, aggregate(data, &options(1)).unwrap());
    }

    #[test]
    fn oversized_station_count_fails() {
        let opts = ScanOptions {
            workers: 1,
            expected_stations: usize::MAX / 2,
        };
        assert!(aggregate(b"a;1.0\n", &opts).is_err());
    }

    #[test]
    fn malformed_input_fails_the_batch() {
        let data = b"a;1.0\nb;2.0\nc;oops\nd;4.0\n";
        assert!(aggregate(data, &options(2)).is_err());
    }

    #[test]
    fn empty_input() {
        assert!(aggregate(b"", &options(4)).unwrap().is_empty());
    }
}
