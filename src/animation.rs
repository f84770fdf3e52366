//! Time-driven motion helpers.
//!
//! Time is always passed in explicitly; nothing here reads a clock.

use std::f32::consts::TAU;

/// Length of one sleep cycle, in oscillation periods.
pub const SLEEP_CYCLE: i64 = 10;

/// Number of periods at the start of every sleep cycle that actually move.
pub const ACTIVE_PERIODS: i64 = 3;

/// Index of the `2π` period that `phase` falls in, wrapped to the sleep cycle.
///
/// Always in `0..SLEEP_CYCLE`, also for negative phases.
pub fn period_index(phase: f32) -> i64 {
    ((phase / TAU).floor() as i64).rem_euclid(SLEEP_CYCLE)
}

/// A cosine that spends most of its time asleep.
///
/// Follows `cos(phase)` during the first [`ACTIVE_PERIODS`] periods of every
/// [`SLEEP_CYCLE`], and holds the rest pose `1.0` otherwise. Both ends of an
/// active burst land on `cos(2πn) = 1`, so the motion starts and stops
/// without a jump.
pub fn lazy_oscillate(phase: f32) -> f32 {
    if period_index(phase) < ACTIVE_PERIODS {
        phase.cos()
    } else {
        1.0
    }
}
