use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use std::{fmt::Write, path::PathBuf};
use stepline_core::{LinePlanner, RecordingScheduler, TracingObserver};

#[derive(Args)]
pub struct PlanArgs {
    /// Path to the machine description (TOML or JSON).
    pub config: PathBuf,

    /// Axis to move. Pass twice for a coordinated two-axis line.
    #[arg(long = "axis", required = true)]
    pub axes: Vec<String>,

    /// Relative displacement for each axis, in `--axis` order.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "to")]
    pub by: Vec<i64>,

    /// Absolute target for each axis, in `--axis` order.
    #[arg(long, allow_negative_numbers = true)]
    pub to: Vec<i64>,

    /// Speed in length units per second. 0 moves at the maximum.
    #[arg(long, default_value_t = 0)]
    pub speed: u64,
}

enum Target {
    Relative,
    Absolute,
}

impl PlanArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file(&self.config)?;
        config.validate()?;

        tracing::info!("Planning line with config: {}", self.config.display());

        print!("{}", self.execute(&config)?);
        Ok(())
    }

    /// Plan the requested line and render the scheduled steps
    pub fn execute(&self, config: &Config) -> Result<String> {
        let (target, values) = match (self.by.is_empty(), self.to.is_empty()) {
            (false, true) => (Target::Relative, &self.by),
            (true, false) => (Target::Absolute, &self.to),
            _ => anyhow::bail!("exactly one of --by or --to is required"),
        };
        if values.len() != self.axes.len() {
            anyhow::bail!(
                "expected one coordinate per axis ({}), got {}",
                self.axes.len(),
                values.len()
            );
        }

        if let [first, second] = self.axes.as_slice()
            && first == second
        {
            anyhow::bail!("axis {first} is listed twice");
        }

        let axes = self
            .axes
            .iter()
            .map(|name| config.axis(name))
            .collect::<Result<Vec<_>>>()?;

        if let Target::Absolute = target {
            for (axis, value) in axes.iter().zip(values) {
                if axis.checked_displacement_to(*value).is_none() {
                    anyhow::bail!(
                        "target {value} is out of range for axis {} at {}",
                        axis.name,
                        axis.current_pos
                    );
                }
            }
        }

        let mut planner =
            LinePlanner::new(RecordingScheduler::default()).with_observer(TracingObserver);
        let planned = match (axes.as_slice(), values.as_slice(), target) {
            ([axis], [value], Target::Relative) => planner.plan_line(axis, *value, self.speed),
            ([axis], [value], Target::Absolute) => {
                planner.plan_line_absolute(axis, *value, self.speed)
            }
            ([first, second], [a, b], Target::Relative) => {
                planner.plan_line_2d(first, second, *a, *b, self.speed)
            }
            ([first, second], [a, b], Target::Absolute) => {
                planner.plan_line_2d_absolute(first, second, *a, *b, self.speed)
            }
            _ => anyhow::bail!("lines are limited to one or two axes"),
        };
        planned.with_context(|| format!("cannot plan line on {}", self.axes.join(", ")))?;

        let mut out = String::new();
        for steps in planner.into_scheduler().scheduled {
            writeln!(
                out,
                "{}: {} steps, {} us/step",
                steps.axis, steps.steps, steps.step_delay
            )?;
        }
        Ok(out)
    }
}
