use thiserror::Error;

/// Failures the simulation engine reports before or after running trials.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field}: bounds must be finite (got {min}..{max})")]
    NonFiniteBound {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidBaseline { field: &'static str, value: f64 },

    #[error("at least one trial is required to summarize a simulation")]
    NoTrials,

    #[error("a histogram needs at least one bin")]
    ZeroBins,

    #[error("{field} of {requested} exceeds the limit of {limit}")]
    LimitExceeded {
        field: &'static str,
        requested: usize,
        limit: usize,
    },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
