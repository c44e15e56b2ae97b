//! Memory allocation benchmark harness
//!
//! Drives an external benchmark executable over every strategy id, with and
//! without `madvise`, at randomly drawn allocation sizes; parses what it
//! prints; and reduces the measurements to per-method throughput statistics.
//!
//! The pipeline is strictly sequential: one benchmark process at a time, so
//! runs do not compete for memory bandwidth.
//!
//! - [`sweep`] owns the record list and drives a [`invoker::BenchmarkRunner`]
//! - [`parser`] turns captured stdout/stderr into [`record::Record`]s
//! - [`aggregate`] builds the columnar table, throughput and grouped stats
//! - [`persist`] writes both tables as pipe-separated files
//!
//! Run: `cargo run --release -p membench` next to a `./benchmark` binary.

pub mod aggregate;
pub mod config;
pub mod invoker;
pub mod parser;
pub mod persist;
pub mod progress;
pub mod record;
pub mod report;
pub mod strategy;
pub mod sweep;

pub use aggregate::{aggregate, AggregateError, ResultTable, StatisticsTable};
pub use invoker::{BenchmarkRunner, ProcessRunner, RawOutput};
pub use record::{ErrorRecord, Measurement, Record};
pub use sweep::{run_sweep, run_sweep_with_progress, SweepConfig, SweepResults, TrialParams};
