//! Step planning for straight-line stepper moves.
//!
//! Converts a displacement and a speed into per-axis step counts and pulse
//! delays so that one or two axes arrive together. The crate only computes;
//! pulse generation is left to a [`StepScheduler`].

pub mod axis;
pub mod line;
pub mod observer;
pub mod scheduler;
pub mod speed;

pub use axis::Axis;
pub use line::{AxisPlan, LinePlan, LinePlan2d, LinePlanner};
pub use observer::{PlanEvent, PlanObserver, TracingObserver};
pub use scheduler::{RecordingScheduler, ScheduledSteps, StepScheduler};
pub use speed::{MAX_SPEED, TooFast, max_speed, resolve_speed};
