use crate::axis::Axis;

/// Receives the step count and pacing computed for each axis of a line.
///
/// Called once per axis for every successfully planned line, in axis order.
/// The planner never waits on or observes how the steps are executed.
pub trait StepScheduler {
    /// `steps` carries the direction in its sign, `step_delay` is the pause
    /// between pulses in microseconds.
    fn prepare_steps(&mut self, axis: &Axis, steps: i64, step_delay: u64);
}

impl<S: StepScheduler + ?Sized> StepScheduler for &mut S {
    fn prepare_steps(&mut self, axis: &Axis, steps: i64, step_delay: u64) {
        (**self).prepare_steps(axis, steps, step_delay)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledSteps {
    pub axis: String,
    pub steps: i64,
    pub step_delay: u64,
}

/// Scheduler that keeps every request in call order
#[derive(Default, Debug)]
pub struct RecordingScheduler {
    pub scheduled: Vec<ScheduledSteps>,
}

impl StepScheduler for RecordingScheduler {
    fn prepare_steps(&mut self, axis: &Axis, steps: i64, step_delay: u64) {
        self.scheduled.push(ScheduledSteps {
            axis: axis.name.clone(),
            steps,
            step_delay,
        });
    }
}
