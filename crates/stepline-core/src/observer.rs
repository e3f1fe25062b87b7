//! Optional diagnostics for the planner.
//!
//! The planner reports the values it derives as [`PlanEvent`]s. Nothing is
//! reported unless an observer is installed, so the arithmetic runs without
//! any output sink.

use crate::axis::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEvent<'a> {
    /// A line was requested on `axis`, one event per involved axis
    Request {
        axis: &'a Axis,
        displacement: i64,
        speed: u64,
    },
    /// The shared timing of the line once the speed was resolved
    Timing {
        speed: u64,
        path_length: u64,
        duration: u64,
    },
    /// Final pacing for one axis, emitted right before scheduling
    Planned {
        axis: &'a Axis,
        steps: i64,
        step_delay: u64,
    },
}

pub trait PlanObserver {
    fn observe(&mut self, event: &PlanEvent<'_>);
}

impl PlanObserver for () {
    fn observe(&mut self, _event: &PlanEvent<'_>) {}
}

impl<O: PlanObserver + ?Sized> PlanObserver for &mut O {
    fn observe(&mut self, event: &PlanEvent<'_>) {
        (**self).observe(event)
    }
}

/// Forwards plan events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PlanObserver for TracingObserver {
    fn observe(&mut self, event: &PlanEvent<'_>) {
        match *event {
            PlanEvent::Request {
                axis,
                displacement,
                speed,
            } => tracing::debug!(
                axis = %axis.name,
                position = axis.current_pos,
                displacement,
                speed,
                "line requested"
            ),
            PlanEvent::Timing {
                speed,
                path_length,
                duration,
            } => tracing::debug!(speed, path_length, duration_us = duration, "line timing"),
            PlanEvent::Planned {
                axis,
                steps,
                step_delay,
            } => tracing::debug!(
                axis = %axis.name,
                steps,
                step_delay_us = step_delay,
                "axis planned"
            ),
        }
    }
}
