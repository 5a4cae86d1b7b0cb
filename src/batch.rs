use std::thread;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::params::SimulationParameters;
use crate::rng::SeedSource;
use crate::trial::ScenarioSampler;

pub const DEFAULT_TRIALS: usize = 10_000;

/// Upper bound on partitions in one run. A fixed cap rather than the host's
/// core count, so a given `(seed, workers)` yields the same values anywhere.
pub const MAX_WORKERS: usize = 64;

/// How trials are spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrialSchedule {
    /// One generator, trials drawn in order.
    #[default]
    Sequential,
    /// `workers` contiguous chunks, each with its own derived generator.
    /// Reproducible per `(seed, workers)` but not equal to the sequential
    /// draw order.
    Partitioned { workers: usize },
}

impl TrialSchedule {
    pub fn from_workers(workers: usize) -> Self {
        if workers > 1 {
            TrialSchedule::Partitioned { workers }
        } else {
            TrialSchedule::Sequential
        }
    }
}

/// Runs `trials` scenarios against one generator and returns acres needed
/// per trial, in trial order.
pub fn run_batch<R: Rng + ?Sized>(
    params: &SimulationParameters,
    trials: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if trials == 0 {
        return Err(SimulationError::NoTrials);
    }
    let sampler = ScenarioSampler::new(params)?;
    Ok((0..trials).map(|_| sampler.sample(rng).acres_needed).collect())
}

/// Splits `trials` over scoped worker threads. Each worker fills a local
/// buffer; buffers are concatenated in partition order once all have joined.
pub fn run_partitioned(
    params: &SimulationParameters,
    trials: usize,
    seeds: SeedSource,
    workers: usize,
) -> Result<Vec<f64>> {
    if trials == 0 {
        return Err(SimulationError::NoTrials);
    }
    let sampler = ScenarioSampler::new(params)?;
    let workers = workers.clamp(1, trials.min(MAX_WORKERS));
    let chunks = partition_sizes(trials, workers);

    let buffers: Vec<Vec<f64>> = thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(index, &len)| {
                let mut rng = seeds.partition(index);
                scope.spawn(move || {
                    (0..len)
                        .map(|_| sampler.sample(&mut rng).acres_needed)
                        .collect::<Vec<f64>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(buffer) => buffer,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut results = Vec::with_capacity(trials);
    for buffer in buffers {
        results.extend(buffer);
    }
    Ok(results)
}

/// Runs the batch according to `schedule`.
pub fn run_scheduled(
    params: &SimulationParameters,
    trials: usize,
    seeds: SeedSource,
    schedule: TrialSchedule,
) -> Result<Vec<f64>> {
    match schedule {
        TrialSchedule::Sequential => run_batch(params, trials, &mut seeds.master()),
        TrialSchedule::Partitioned { workers } => run_partitioned(params, trials, seeds, workers),
    }
}

fn partition_sizes(trials: usize, workers: usize) -> Vec<usize> {
    let base = trials / workers;
    let extra = trials % workers;
    (0..workers)
        .map(|index| base + usize::from(index < extra))
        .collect()
}
