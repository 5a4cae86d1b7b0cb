use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Closed numeric interval supplied by the caller. Sampling treats it as
/// `[min, max)`, see [`crate::sampler::UniformRange`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Rejects NaN, infinite and inverted bounds.
    pub fn check_ordered(&self, field: &'static str) -> Result<()> {
        // `!(a <= b)` also rejects NaN bounds.
        if !(self.min <= self.max) {
            return Err(SimulationError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimulationError::NonFiniteBound {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn check_positive(&self, field: &'static str) -> Result<()> {
        self.check_ordered(field)?;
        if self.min <= 0.0 {
            return Err(SimulationError::NonPositive {
                field,
                value: self.min,
            });
        }
        Ok(())
    }
}

fn default_population() -> f64 {
    1_000.0
}

fn default_vacant_land() -> f64 {
    100.0
}

fn default_population_change() -> ValueRange {
    ValueRange::new(5.0, 25.0)
}

fn default_household_size() -> ValueRange {
    ValueRange::new(2.2, 2.8)
}

fn default_density() -> ValueRange {
    ValueRange::new(4.0, 8.0)
}

/// Inputs to one simulation run: two baselines and three sampled ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    #[serde(default = "default_population")]
    pub current_population: f64,
    /// Acres of vacant land currently available.
    #[serde(default = "default_vacant_land")]
    pub current_vacant_land: f64,
    /// Percent change in population, e.g. `5.0` for +5 %.
    #[serde(default = "default_population_change")]
    pub population_change_percent: ValueRange,
    /// Persons per household.
    #[serde(default = "default_household_size")]
    pub household_size: ValueRange,
    /// Housing units per acre.
    #[serde(default = "default_density")]
    pub density: ValueRange,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            current_population: default_population(),
            current_vacant_land: default_vacant_land(),
            population_change_percent: default_population_change(),
            household_size: default_household_size(),
            density: default_density(),
        }
    }
}

impl SimulationParameters {
    /// Rejects inverted or infinite ranges, non-positive household size or
    /// density bounds, and negative or non-finite baselines.
    pub fn validate(&self) -> Result<()> {
        check_baseline("current_population", self.current_population)?;
        check_baseline("current_vacant_land", self.current_vacant_land)?;
        self.population_change_percent
            .check_ordered("population_change_percent")?;
        self.household_size.check_positive("household_size")?;
        self.density.check_positive("density")?;
        Ok(())
    }
}

fn check_baseline(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::InvalidBaseline { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let params = SimulationParameters {
            population_change_percent: ValueRange::new(10.0, 5.0),
            ..SimulationParameters::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimulationError::InvertedRange {
                field: "population_change_percent",
                min: 10.0,
                max: 5.0,
            })
        );
    }

    #[test]
    fn negative_population_change_is_allowed() {
        let params = SimulationParameters {
            population_change_percent: ValueRange::new(-10.0, -2.0),
            ..SimulationParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_household_size_is_rejected() {
        let params = SimulationParameters {
            household_size: ValueRange::new(0.0, 3.0),
            ..SimulationParameters::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimulationError::NonPositive {
                field: "household_size",
                value: 0.0,
            })
        );
    }

    #[test]
    fn negative_density_is_rejected() {
        let params = SimulationParameters {
            density: ValueRange::fixed(-1.0),
            ..SimulationParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::NonPositive {
                field: "density",
                ..
            })
        ));
    }

    #[test]
    fn negative_vacant_land_is_rejected() {
        let params = SimulationParameters {
            current_vacant_land: -1.0,
            ..SimulationParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidBaseline {
                field: "current_vacant_land",
                ..
            })
        ));
    }

    #[test]
    fn infinite_upper_bound_is_rejected() {
        let params = SimulationParameters {
            population_change_percent: ValueRange::new(5.0, f64::INFINITY),
            ..SimulationParameters::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimulationError::NonFiniteBound {
                field: "population_change_percent",
                min: 5.0,
                max: f64::INFINITY,
            })
        );
    }

    #[test]
    fn infinite_lower_bound_is_rejected() {
        let params = SimulationParameters {
            population_change_percent: ValueRange::new(f64::NEG_INFINITY, 5.0),
            ..SimulationParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::NonFiniteBound {
                field: "population_change_percent",
                ..
            })
        ));

        let params = SimulationParameters {
            density: ValueRange::new(4.0, f64::INFINITY),
            ..SimulationParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimulationError::NonFiniteBound { field: "density", .. })
        ));
    }

    #[test]
    fn nan_bound_is_rejected() {
        let params = SimulationParameters {
            density: ValueRange::new(f64::NAN, 4.0),
            ..SimulationParameters::default()
        };
        assert!(params.validate().is_err());
    }
}
