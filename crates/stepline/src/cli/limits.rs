use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::{fmt::Write, path::PathBuf};

#[derive(Args)]
pub struct LimitsArgs {
    /// Path to the machine description (TOML or JSON).
    pub config: PathBuf,
}

impl LimitsArgs {
    pub fn run(&self) -> Result<()> {
        let config = Config::from_file(&self.config)?;
        config.validate()?;
        print!("{}", Self::execute(&config)?);
        Ok(())
    }

    /// Render the maximum speed of every configured axis
    pub fn execute(config: &Config) -> Result<String> {
        let mut out = String::new();
        for axis in config.axes.iter().map(|axis| axis.to_axis()) {
            writeln!(
                out,
                "{}: max speed {} units/s ({} units/step, {} us pulse delay)",
                axis.name,
                axis.max_speed(),
                axis.distance_per_step,
                axis.pulse_delay
            )?;
        }
        Ok(out)
    }
}
