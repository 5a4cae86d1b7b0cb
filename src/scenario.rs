use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    batch::{TrialSchedule, DEFAULT_TRIALS},
    engine::EngineSettings,
    histogram::DEFAULT_BINS,
    params::SimulationParameters,
};

fn default_seed() -> u64 {
    42
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}

fn default_histogram_bins() -> usize {
    DEFAULT_BINS
}

fn default_workers() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// A named set of parameters plus the run settings to simulate them with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub parameters: SimulationParameters,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
            seed: default_seed(),
            trials: default_trials(),
            histogram_bins: default_histogram_bins(),
            workers: default_workers(),
            logging: LoggingConfig::default(),
            parameters: SimulationParameters::default(),
        }
    }
}

impl Scenario {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            seed: self.seed,
            trials: self.trials,
            histogram_bins: self.histogram_bins,
            schedule: TrialSchedule::from_workers(self.workers),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize scenario")
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Reads and parses the file, then validates its parameters.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .parameters
            .validate()
            .with_context(|| format!("Invalid parameters in {}", path.display()))?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_takes_defaults() {
        let scenario: Scenario = serde_yaml::from_str("name: bare\n").unwrap();
        assert_eq!(scenario.name, "bare");
        assert_eq!(scenario.trials, DEFAULT_TRIALS);
        assert_eq!(scenario.histogram_bins, DEFAULT_BINS);
        assert_eq!(scenario.logging.level, "info");
        assert_eq!(scenario.parameters, SimulationParameters::default());
        assert_eq!(
            scenario.engine_settings().schedule,
            TrialSchedule::Sequential
        );
    }

    #[test]
    fn yaml_round_trip_keeps_parameters() {
        let scenario = Scenario::default();
        let text = scenario.to_yaml().unwrap();
        let parsed: Scenario = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.parameters, scenario.parameters);
        assert_eq!(parsed.seed, scenario.seed);
    }

    #[test]
    fn workers_select_partitioned_schedule() {
        let scenario = Scenario {
            workers: 4,
            ..Scenario::default()
        };
        assert_eq!(
            scenario.engine_settings().schedule,
            TrialSchedule::Partitioned { workers: 4 }
        );
    }
}
