//! Speed resolution against an axis's hardware limit.
//!
//! Speeds are integer length units per second. A requested speed of
//! [`MAX_SPEED`] (zero) selects the fastest speed the axis can sustain.

use thiserror::Error;

/// Sentinel speed requesting the axis maximum
pub const MAX_SPEED: u64 = 0;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// The requested speed exceeds what the slowest involved axis can sustain.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("requested speed {requested} exceeds maximum {max}")]
pub struct TooFast {
    pub requested: u64,
    pub max: u64,
}

pub type Result<T, E = TooFast> = std::result::Result<T, E>;

/// Maximum speed of an axis in length units per second.
///
/// Evaluated as `(distance_per_step * 1000 / pulse_delay) * 1000`. Scaling by
/// a million up front overflows a 32-bit accumulator once `distance_per_step`
/// passes ~4300, while dividing first drops the sub-microsecond remainder.
/// The split keeps three significant digits of the remainder. The final
/// multiply is widened so that fine-resolution axes with tiny pulse delays
/// still fit.
pub fn max_speed(distance_per_step: u32, pulse_delay: u32) -> u64 {
    let per_milli = u64::from(distance_per_step) * 1000 / u64::from(pulse_delay);
    per_milli * 1000
}

/// Resolve a requested speed against `max`.
pub fn resolve_speed(requested: u64, max: u64) -> Result<u64> {
    if requested == MAX_SPEED {
        return Ok(max);
    }
    if requested > max {
        return Err(TooFast { requested, max });
    }
    Ok(requested)
}

/// Time in microseconds to cover `length` at `speed`.
///
/// The division happens in floating point to avoid a second integer scaling
/// by a million; the result is truncated. A zero speed saturates.
pub fn transit_micros(length: u64, speed: u64) -> u64 {
    (length as f64 / speed as f64 * MICROS_PER_SECOND) as u64
}
