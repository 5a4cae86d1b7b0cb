use rand::Rng;

use crate::error::Result;
use crate::params::ValueRange;

/// Uniform sampler over `[min, max)`.
///
/// `max` is only reached in the limit: a draw is `min + u * (max - min)` with
/// `u` in `[0, 1)`. When `min == max` every draw returns `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformRange {
    min: f64,
    span: f64,
}

impl UniformRange {
    /// Fails with [`SimulationError::InvertedRange`] when `min > max` or
    /// either bound is NaN, and with [`SimulationError::NonFiniteBound`] for
    /// an infinite bound.
    pub fn new(field: &'static str, range: ValueRange) -> Result<Self> {
        range.check_ordered(field)?;
        Ok(Self {
            min: range.min,
            span: range.width(),
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let fraction: f64 = rng.gen();
        self.min + fraction * self.span
    }
}
