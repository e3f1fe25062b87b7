//! Straight-line step planning for one or two axes.
//!
//! A line is covered in a single time budget `duration`. Each axis spreads
//! its own step count evenly across that budget, so every axis finishes at
//! the same instant and the tool traces a straight segment.

use crate::{
    axis::Axis,
    observer::{PlanEvent, PlanObserver},
    scheduler::StepScheduler,
    speed::{Result, resolve_speed, transit_micros},
};

/// Steps and pacing for one axis of a line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisPlan {
    /// Signed pulse count, the sign selects the direction
    pub steps: i64,
    /// Microseconds between pulses
    pub step_delay: u64,
}

impl AxisPlan {
    /// Spread `steps` across `duration` microseconds.
    ///
    /// A displacement shorter than one step yields no pulses and a zero delay.
    fn pace(steps: i64, duration: u64) -> Self {
        let step_delay = duration.checked_div(steps.unsigned_abs()).unwrap_or(0);
        Self { steps, step_delay }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePlan {
    pub axis: AxisPlan,
    /// Resolved speed in length units per second
    pub speed: u64,
    /// Total transit time in microseconds
    pub duration: u64,
}

impl LinePlan {
    pub fn compute(axis: &Axis, displacement: i64, speed: u64) -> Result<Self> {
        let steps = axis.steps_for(displacement);
        let speed = resolve_speed(speed, axis.max_speed())?;
        let duration = transit_micros(displacement.unsigned_abs(), speed);
        Ok(Self {
            axis: AxisPlan::pace(steps, duration),
            speed,
            duration,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePlan2d {
    pub first: AxisPlan,
    pub second: AxisPlan,
    /// Length of the diagonal, truncated to whole length units
    pub path_length: u64,
    /// Resolved speed along the diagonal
    pub speed: u64,
    /// Transit time shared by both axes, in microseconds
    pub duration: u64,
}

impl LinePlan2d {
    /// The requested speed applies along the diagonal and is capped by the
    /// slower of the two axes.
    pub fn compute(
        first: &Axis,
        second: &Axis,
        first_displacement: i64,
        second_displacement: i64,
        speed: u64,
    ) -> Result<Self> {
        let first_steps = first.steps_for(first_displacement);
        let second_steps = second.steps_for(second_displacement);

        let max = first.max_speed().min(second.max_speed());
        let speed = resolve_speed(speed, max)?;

        let path_length = path_length(first_displacement, second_displacement);
        let duration = transit_micros(path_length, speed);

        Ok(Self {
            first: AxisPlan::pace(first_steps, duration),
            second: AxisPlan::pace(second_steps, duration),
            path_length,
            speed,
            duration,
        })
    }
}

fn path_length(a: i64, b: i64) -> u64 {
    let (a, b) = (a as f64, b as f64);
    (a * a + b * b).sqrt() as u64
}

/// Plans lines and hands the result to a [`StepScheduler`].
///
/// Every entry point either schedules all involved axes or none of them.
pub struct LinePlanner<S, O = ()> {
    scheduler: S,
    observer: O,
}

impl<S: StepScheduler> LinePlanner<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            observer: (),
        }
    }
}

impl<S: StepScheduler, O: PlanObserver> LinePlanner<S, O> {
    pub fn with_observer<P: PlanObserver>(self, observer: P) -> LinePlanner<S, P> {
        LinePlanner {
            scheduler: self.scheduler,
            observer,
        }
    }

    /// Move `axis` by `displacement` at `speed` (0 for the axis maximum).
    pub fn plan_line(&mut self, axis: &Axis, displacement: i64, speed: u64) -> Result<()> {
        self.observer.observe(&PlanEvent::Request {
            axis,
            displacement,
            speed,
        });

        let plan = LinePlan::compute(axis, displacement, speed)?;

        self.observer.observe(&PlanEvent::Timing {
            speed: plan.speed,
            path_length: displacement.unsigned_abs(),
            duration: plan.duration,
        });
        self.emit(axis, plan.axis);
        Ok(())
    }

    /// Move `axis` to the absolute position `target`.
    pub fn plan_line_absolute(&mut self, axis: &Axis, target: i64, speed: u64) -> Result<()> {
        self.plan_line(axis, axis.displacement_to(target), speed)
    }

    /// Move two axes together along a straight diagonal.
    pub fn plan_line_2d(
        &mut self,
        first: &Axis,
        second: &Axis,
        first_displacement: i64,
        second_displacement: i64,
        speed: u64,
    ) -> Result<()> {
        self.observer.observe(&PlanEvent::Request {
            axis: first,
            displacement: first_displacement,
            speed,
        });
        self.observer.observe(&PlanEvent::Request {
            axis: second,
            displacement: second_displacement,
            speed,
        });

        let plan = LinePlan2d::compute(
            first,
            second,
            first_displacement,
            second_displacement,
            speed,
        )?;

        self.observer.observe(&PlanEvent::Timing {
            speed: plan.speed,
            path_length: plan.path_length,
            duration: plan.duration,
        });
        self.emit(first, plan.first);
        self.emit(second, plan.second);
        Ok(())
    }

    /// Move two axes together to the absolute point `(first_target, second_target)`.
    pub fn plan_line_2d_absolute(
        &mut self,
        first: &Axis,
        second: &Axis,
        first_target: i64,
        second_target: i64,
        speed: u64,
    ) -> Result<()> {
        self.plan_line_2d(
            first,
            second,
            first.displacement_to(first_target),
            second.displacement_to(second_target),
            speed,
        )
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn into_scheduler(self) -> S {
        self.scheduler
    }

    fn emit(&mut self, axis: &Axis, plan: AxisPlan) {
        self.observer.observe(&PlanEvent::Planned {
            axis,
            steps: plan.steps,
            step_delay: plan.step_delay,
        });
        self.scheduler.prepare_steps(axis, plan.steps, plan.step_delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scheduler::{RecordingScheduler, ScheduledSteps},
        speed::{MAX_SPEED, TooFast},
    };

    fn unit_axis(name: &str) -> Axis {
        Axis::new(name, 1000, 1000)
    }

    fn planner() -> LinePlanner<RecordingScheduler> {
        LinePlanner::new(RecordingScheduler::default())
    }

    fn scheduled(axis: &str, steps: i64, step_delay: u64) -> ScheduledSteps {
        ScheduledSteps {
            axis: axis.into(),
            steps,
            step_delay,
        }
    }

    #[derive(Default)]
    struct EventLog(Vec<String>);

    impl PlanObserver for EventLog {
        fn observe(&mut self, event: &PlanEvent<'_>) {
            let line = match event {
                PlanEvent::Request {
                    axis,
                    displacement,
                    speed,
                } => format!("request {} {displacement} @{speed}", axis.name),
                PlanEvent::Timing {
                    speed,
                    path_length,
                    duration,
                } => format!("timing {path_length} @{speed} {duration}us"),
                PlanEvent::Planned {
                    axis,
                    steps,
                    step_delay,
                } => format!("planned {} {steps} {step_delay}us", axis.name),
            };
            self.0.push(line);
        }
    }

    #[test]
    fn single_axis_at_fixed_speed() {
        let plan = LinePlan::compute(&unit_axis("x"), 10_000, 1000).unwrap();
        assert_eq!(plan.speed, 1000);
        assert_eq!(plan.duration, 10_000_000);
        assert_eq!(
            plan.axis,
            AxisPlan {
                steps: 10,
                step_delay: 1_000_000
            }
        );
    }

    #[test]
    fn single_axis_max_speed() {
        let axis = Axis::new("x", 7500, 1000);
        let plan = LinePlan::compute(&axis, 75_000, MAX_SPEED).unwrap();
        assert_eq!(plan.speed, 7_500_000);
        assert_eq!(plan.duration, 10_000);
        assert_eq!(plan.axis.steps, 10);
        // at full speed the pacing equals the hardware pulse delay
        assert_eq!(plan.axis.step_delay, 1000);
    }

    #[test]
    fn negative_displacement_reverses_steps_only() {
        let axis = unit_axis("x");
        let forward = LinePlan::compute(&axis, 10_000, 1000).unwrap();
        let backward = LinePlan::compute(&axis, -10_000, 1000).unwrap();
        assert_eq!(backward.axis.steps, -10);
        assert_eq!(backward.axis.step_delay, forward.axis.step_delay);
        assert_eq!(backward.duration, forward.duration);
    }

    #[test]
    fn direction_is_symmetric() {
        bolero::check!()
            .with_type::<(i32, u32, u32, u32)>()
            .for_each(|&(displacement, dps, pd, speed)| {
                let axis = Axis::new("x", dps % 100_000 + 1, pd % 10_000 + 1);
                let displacement = i64::from(displacement);
                let speed = u64::from(speed);
                let forward = LinePlan::compute(&axis, displacement, speed);
                let backward = LinePlan::compute(&axis, -displacement, speed);
                match (forward, backward) {
                    (Ok(forward), Ok(backward)) => {
                        assert_eq!(forward.axis.steps, -backward.axis.steps);
                        assert_eq!(forward.axis.step_delay, backward.axis.step_delay);
                    }
                    (Err(forward), Err(backward)) => assert_eq!(forward, backward),
                    (forward, backward) => panic!("{forward:?} vs {backward:?}"),
                }
            });
    }

    #[test]
    fn max_speed_request_never_too_fast() {
        bolero::check!()
            .with_type::<(i32, u32, u32)>()
            .for_each(|&(displacement, dps, pd)| {
                let axis = Axis::new("x", dps % 100_000 + 1, pd % 10_000 + 1);
                let plan = LinePlan::compute(&axis, i64::from(displacement), MAX_SPEED).unwrap();
                assert_eq!(plan.speed, axis.max_speed());
            });
    }

    #[test]
    fn sub_step_displacement_is_empty() {
        let plan = LinePlan::compute(&unit_axis("x"), 999, 1000).unwrap();
        assert_eq!(plan.axis, AxisPlan::default());
        assert_eq!(plan.duration, 999_000);
    }

    #[test]
    fn two_axis_diagonal_at_max_speed() {
        let plan =
            LinePlan2d::compute(&unit_axis("x"), &unit_axis("y"), 3000, 4000, MAX_SPEED).unwrap();
        assert_eq!(plan.speed, 1_000_000);
        assert_eq!(plan.path_length, 5000);
        assert_eq!(plan.duration, 5000);
        assert_eq!(
            plan.first,
            AxisPlan {
                steps: 3,
                step_delay: 1666
            }
        );
        assert_eq!(
            plan.second,
            AxisPlan {
                steps: 4,
                step_delay: 1250
            }
        );
    }

    #[test]
    fn two_axis_slower_axis_caps_speed() {
        let fast = Axis::new("x", 7500, 1000);
        let slow = Axis::new("y", 1000, 500);
        assert_eq!(fast.max_speed(), 7_500_000);
        assert_eq!(slow.max_speed(), 2_000_000);

        let plan = LinePlan2d::compute(&fast, &slow, 30_000, 40_000, MAX_SPEED).unwrap();
        assert_eq!(plan.speed, 2_000_000);
        let plan = LinePlan2d::compute(&slow, &fast, 30_000, 40_000, MAX_SPEED).unwrap();
        assert_eq!(plan.speed, 2_000_000);

        let err = LinePlan2d::compute(&fast, &slow, 30_000, 40_000, 2_000_001).unwrap_err();
        assert_eq!(
            err,
            TooFast {
                requested: 2_000_001,
                max: 2_000_000
            }
        );
    }

    #[test]
    fn two_axis_effective_max_is_minimum() {
        bolero::check!()
            .with_type::<(u32, u32, u32, u32)>()
            .for_each(|&(dps1, pd1, dps2, pd2)| {
                let first = Axis::new("x", dps1 % 100_000 + 1, pd1 % 10_000 + 1);
                let second = Axis::new("y", dps2 % 100_000 + 1, pd2 % 10_000 + 1);
                let plan = LinePlan2d::compute(&first, &second, 10_000, 10_000, MAX_SPEED).unwrap();
                assert_eq!(plan.speed, first.max_speed().min(second.max_speed()));
            });
    }

    #[test]
    fn two_axis_single_direction_line() {
        let plan = LinePlan2d::compute(&unit_axis("x"), &unit_axis("y"), -3000, 0, MAX_SPEED)
            .unwrap();
        assert_eq!(plan.path_length, 3000);
        assert_eq!(plan.duration, 3000);
        assert_eq!(
            plan.first,
            AxisPlan {
                steps: -3,
                step_delay: 1000
            }
        );
        assert_eq!(plan.second, AxisPlan::default());
    }

    #[test]
    fn plan_line_schedules_axis() {
        let axis = unit_axis("x");
        let mut planner = planner();
        planner.plan_line(&axis, -10_000, 1000).unwrap();
        assert_eq!(
            planner.into_scheduler().scheduled,
            vec![scheduled("x", -10, 1_000_000)]
        );
    }

    #[test]
    fn too_fast_schedules_nothing() {
        let x = unit_axis("x");
        let y = unit_axis("y");
        let mut planner = planner();

        let err = planner.plan_line(&x, 10_000, 1_000_001).unwrap_err();
        assert_eq!(err.max, 1_000_000);
        let err = planner
            .plan_line_2d(&x, &y, 3000, 4000, 1_000_001)
            .unwrap_err();
        assert_eq!(err.requested, 1_000_001);

        assert!(planner.scheduler().scheduled.is_empty());
    }

    #[test]
    fn plan_line_absolute_uses_current_position() {
        let axis = unit_axis("x").with_position(2000);
        let mut planner = planner();
        planner.plan_line_absolute(&axis, 12_000, 1000).unwrap();
        planner.plan_line_absolute(&axis, -8000, 1000).unwrap();
        assert_eq!(
            planner.into_scheduler().scheduled,
            vec![
                scheduled("x", 10, 1_000_000),
                scheduled("x", -10, 1_000_000)
            ]
        );
    }

    #[test]
    fn plan_line_2d_schedules_both_axes_in_order() {
        let x = unit_axis("x");
        let y = unit_axis("y");
        let mut planner = planner();
        planner.plan_line_2d(&x, &y, 3000, -4000, 1000).unwrap();
        assert_eq!(
            planner.into_scheduler().scheduled,
            vec![
                scheduled("x", 3, 1_666_666),
                scheduled("y", -4, 1_250_000)
            ]
        );
    }

    #[test]
    fn plan_line_2d_schedules_idle_axis() {
        let x = unit_axis("x");
        let y = unit_axis("y");
        let mut planner = planner();
        planner.plan_line_2d(&x, &y, -3000, 0, MAX_SPEED).unwrap();
        assert_eq!(
            planner.into_scheduler().scheduled,
            vec![scheduled("x", -3, 1000), scheduled("y", 0, 0)]
        );
    }

    #[test]
    fn plan_line_2d_absolute_uses_current_positions() {
        let x = unit_axis("x").with_position(1000);
        let y = unit_axis("y").with_position(-1000);
        let mut planner = planner();
        planner
            .plan_line_2d_absolute(&x, &y, 4000, 3000, MAX_SPEED)
            .unwrap();
        assert_eq!(
            planner.into_scheduler().scheduled,
            vec![scheduled("x", 3, 1666), scheduled("y", 4, 1250)]
        );
    }

    #[test]
    fn observer_sees_request_before_rejection() {
        let axis = unit_axis("x");
        let mut log = EventLog::default();
        let mut planner = planner().with_observer(&mut log);
        planner.plan_line(&axis, 10_000, 1000).unwrap();
        planner.plan_line(&axis, 10_000, 2_000_000).unwrap_err();
        drop(planner);

        assert_eq!(
            log.0,
            vec![
                "request x 10000 @1000",
                "timing 10000 @1000 10000000us",
                "planned x 10 1000000us",
                "request x 10000 @2000000",
            ]
        );
    }

    #[test]
    fn observer_sees_diagonal() {
        let x = unit_axis("x");
        let y = unit_axis("y");
        let mut log = EventLog::default();
        let mut planner = planner().with_observer(&mut log);
        planner.plan_line_2d(&x, &y, 3000, 4000, MAX_SPEED).unwrap();
        drop(planner);

        assert_eq!(
            log.0,
            vec![
                "request x 3000 @0",
                "request y 4000 @0",
                "timing 5000 @1000000 5000us",
                "planned x 3 1666us",
                "planned y 4 1250us",
            ]
        );
    }
}
