use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{summarize, SimulationSummary};
use crate::batch::{run_batch, run_scheduled, TrialSchedule, DEFAULT_TRIALS};
use crate::error::{Result, SimulationError};
use crate::histogram::{build_histogram, HistogramBin, DEFAULT_BINS};
use crate::params::SimulationParameters;
use crate::rng::SeedSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub seed: u64,
    pub trials: usize,
    pub histogram_bins: usize,
    pub schedule: TrialSchedule,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seed: SeedSource::default().seed(),
            trials: DEFAULT_TRIALS,
            histogram_bins: DEFAULT_BINS,
            schedule: TrialSchedule::Sequential,
        }
    }
}

pub struct EngineBuilder {
    settings: EngineSettings,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.settings.trials = trials;
        self
    }

    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.settings.histogram_bins = bins;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.settings.schedule = TrialSchedule::from_workers(workers);
        self
    }

    pub fn build(self) -> Result<Engine> {
        if self.settings.trials == 0 {
            return Err(SimulationError::NoTrials);
        }
        if self.settings.histogram_bins == 0 {
            return Err(SimulationError::ZeroBins);
        }
        Ok(Engine {
            seeds: SeedSource::new(self.settings.seed),
            settings: self.settings,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

/// Everything one run hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub schedule: TrialSchedule,
    pub summary: SimulationSummary,
    pub histogram: Vec<HistogramBin>,
}

/// Stateless between runs: two calls with the same parameters give the same
/// report.
pub struct Engine {
    settings: EngineSettings,
    seeds: SeedSource,
}

impl Engine {
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Runs the configured number of trials with generators derived from the
    /// configured seed.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationReport> {
        let start = Instant::now();
        let acres = run_scheduled(
            params,
            self.settings.trials,
            self.seeds,
            self.settings.schedule,
        )?;
        debug!(
            trials = acres.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0,
            "batch complete"
        );
        let report = self.finish(params, acres, self.settings.schedule)?;
        info!(
            seed = report.seed,
            trials = report.summary.total_scenarios,
            mean = report.summary.mean,
            percentile_90 = report.summary.percentile_90,
            exceedance_rate = report.summary.exceedance_rate,
            elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0,
            "simulation finished"
        );
        Ok(report)
    }

    /// Runs sequentially against a caller-supplied generator. The report's
    /// `seed` is the configured one and does not describe `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        params: &SimulationParameters,
        rng: &mut R,
    ) -> Result<SimulationReport> {
        let acres = run_batch(params, self.settings.trials, rng)?;
        self.finish(params, acres, TrialSchedule::Sequential)
    }

    fn finish(
        &self,
        params: &SimulationParameters,
        mut acres: Vec<f64>,
        schedule: TrialSchedule,
    ) -> Result<SimulationReport> {
        // Histogram first: summarize sorts in place.
        let histogram = build_histogram(&acres, self.settings.histogram_bins)?;
        let summary = summarize(&mut acres, params.current_vacant_land)?;
        Ok(SimulationReport {
            seed: self.settings.seed,
            schedule,
            summary,
            histogram,
        })
    }
}
