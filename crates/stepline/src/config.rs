use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use stepline_core::Axis;

/// Machine description: the axes available for planning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
}

/// Physical constants of one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Name used to select the axis on the command line
    pub name: String,

    /// Distance covered by one step, in length units (nanometers)
    pub distance_per_step: u32,

    /// Minimum delay between step pulses, in microseconds
    pub pulse_delay: u32,

    /// Current absolute position, in length units
    #[serde(default)]
    pub current_pos: i64,
}

impl AxisConfig {
    pub fn to_axis(&self) -> Axis {
        Axis::new(&self.name, self.distance_per_step, self.pulse_delay)
            .with_position(self.current_pos)
    }
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    /// Reject axis data the planner would silently mis-handle
    pub fn validate(&self) -> Result<()> {
        if self.axes.is_empty() {
            anyhow::bail!("at least one axis must be configured");
        }

        let mut names = HashSet::new();
        for axis in &self.axes {
            if axis.name.is_empty() {
                anyhow::bail!("axes.name cannot be empty");
            }
            if !names.insert(axis.name.as_str()) {
                anyhow::bail!("axis {} is configured more than once", axis.name);
            }
            if axis.distance_per_step == 0 {
                anyhow::bail!("axis {}: distance_per_step must be positive", axis.name);
            }
            if axis.pulse_delay == 0 {
                anyhow::bail!("axis {}: pulse_delay must be positive", axis.name);
            }
        }

        Ok(())
    }

    /// Look up an axis by name
    pub fn axis(&self, name: &str) -> Result<Axis> {
        self.axes
            .iter()
            .find(|axis| axis.name == name)
            .map(AxisConfig::to_axis)
            .with_context(|| format!("unknown axis {name}"))
    }
}
