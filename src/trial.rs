use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::params::SimulationParameters;
use crate::sampler::UniformRange;

/// Rounds up to two decimal places via the ceiling of the scaled value.
///
/// Land demand is never under-estimated: `0.001` becomes `0.01`.
pub fn round_up_cents(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

/// One sampled outcome with every intermediate stage kept for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub population_change: f64,
    pub population_increase: f64,
    pub household_size: f64,
    pub households_needed: f64,
    pub density: f64,
    pub acres_needed: f64,
}

/// Samplers for the three ranged inputs, built once per batch.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSampler {
    current_population: f64,
    population_change: UniformRange,
    household_size: UniformRange,
    density: UniformRange,
}

impl ScenarioSampler {
    /// Validates `params` before any draw is made.
    pub fn new(params: &SimulationParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            current_population: params.current_population,
            population_change: UniformRange::new(
                "population_change_percent",
                params.population_change_percent,
            )?,
            household_size: UniformRange::new("household_size", params.household_size)?,
            density: UniformRange::new("density", params.density)?,
        })
    }

    /// Draws in a fixed order: population change, household size, density.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScenarioResult {
        let population_change = self.population_change.sample(rng) / 100.0;
        let population_increase = population_increase(self.current_population, population_change);

        let household_size = self.household_size.sample(rng);
        let households_needed = (population_increase / household_size).ceil();

        let density = self.density.sample(rng);
        let acres_needed = round_up_cents(households_needed / density);

        ScenarioResult {
            population_change,
            population_increase,
            household_size,
            households_needed,
            density,
            acres_needed,
        }
    }
}

/// Nearest whole person; `.5` rounds away from zero.
pub fn population_increase(current_population: f64, change_fraction: f64) -> f64 {
    (current_population * change_fraction).round()
}

/// Computes a single scenario from `params`.
pub fn compute_scenario<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<ScenarioResult> {
    Ok(ScenarioSampler::new(params)?.sample(rng))
}
