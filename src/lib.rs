//! Parallel min/mean/max aggregation over `name;temperature` measurement files.
//!
//! The input is memory-mapped, split into line-aligned chunks and scanned by a
//! fixed pool of workers. Each worker hashes station names while scanning them,
//! parses readings as fixed-point tenths and accumulates into its own
//! open-addressing table of borrowed keys. The tables are merged into an
//! [`Aggregate`] that owns its keys.

pub mod chunk;
pub mod engine;
pub mod hash;
pub mod input;
pub mod merge;
pub mod parse;
pub mod report;
pub mod stats;
pub mod table;
pub mod worker;

pub use engine::{aggregate, aggregate_file, ScanOptions};
pub use merge::Aggregate;
pub use report::{render, write_report};
pub use stats::Stats;
