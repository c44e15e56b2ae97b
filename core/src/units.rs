//! Unit conversions shared by the sweep driver and the aggregator.
//!
//! The benchmark reports durations in ticks where 1024 * 1024 ticks make one
//! second. That is not a true microsecond, but every throughput value ever
//! persisted was derived with this divisor, so it stays.

/// Bytes in one mebibyte.
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Bytes in one gigabyte as the throughput column counts them (2^30).
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Benchmark duration ticks per second.
pub const TICKS_PER_SECOND: f64 = 1024.0 * 1024.0;

/// `None` when the byte count does not fit in a `u64`.
pub fn mib_to_bytes(mib: u64) -> Option<u64> {
    mib.checked_mul(BYTES_PER_MIB)
}

pub fn bytes_to_gigabytes(bytes: f64) -> f64 {
    bytes / BYTES_PER_GB
}

pub fn ticks_to_seconds(ticks: f64) -> f64 {
    ticks / TICKS_PER_SECOND
}

/// Throughput in GB/s for a byte count moved in `duration` benchmark ticks.
///
/// A zero duration is not special-cased: `0 / 0` yields NaN and a positive
/// byte count over zero ticks yields infinity, both of which end up in the
/// tables as-is.
pub fn throughput_gbps(bytes: f64, duration: f64) -> f64 {
    bytes_to_gigabytes(bytes) / ticks_to_seconds(duration)
}
