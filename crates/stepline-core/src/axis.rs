// Physical description of one stepper-driven coordinate

use crate::speed;

/// One independently stepped coordinate of motion.
///
/// Lengths are expressed in a single machine-wide unit (nanometers in the
/// reference setup) and times in microseconds. The planner only reads an
/// axis; tracking `current_pos` is the owner's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    /// Label used in diagnostics and scheduler records
    pub name: String,
    /// Linear distance advanced by a single step, must be non-zero
    pub distance_per_step: u32,
    /// Minimum delay between two step pulses in microseconds, must be non-zero
    pub pulse_delay: u32,
    /// Current absolute position
    pub current_pos: i64,
}

impl Axis {
    pub fn new(name: impl Into<String>, distance_per_step: u32, pulse_delay: u32) -> Self {
        Self {
            name: name.into(),
            distance_per_step,
            pulse_delay,
            current_pos: 0,
        }
    }

    pub fn with_position(mut self, current_pos: i64) -> Self {
        self.current_pos = current_pos;
        self
    }

    /// Fastest sustainable speed in length units per second
    pub fn max_speed(&self) -> u64 {
        speed::max_speed(self.distance_per_step, self.pulse_delay)
    }

    /// Signed number of whole steps covering `displacement`.
    ///
    /// Truncates toward zero so a partial trailing step is never taken.
    pub fn steps_for(&self, displacement: i64) -> i64 {
        displacement / i64::from(self.distance_per_step)
    }

    /// Displacement needed to reach `target` from the current position.
    ///
    /// Saturates at the `i64` range; use [`Axis::checked_displacement_to`] to
    /// reject targets that cannot be reached in a single line.
    pub fn displacement_to(&self, target: i64) -> i64 {
        target.saturating_sub(self.current_pos)
    }

    /// Like [`Axis::displacement_to`], `None` when the distance overflows `i64`
    pub fn checked_displacement_to(&self, target: i64) -> Option<i64> {
        target.checked_sub(self.current_pos)
    }
}
