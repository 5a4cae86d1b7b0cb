use serde::Serialize;

use crate::error::{Result, SimulationError};

pub const DEFAULT_BINS: usize = 20;

/// Half-open interval `[start, end)` over acres needed. The last bin also
/// holds the maximum value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub label: String,
    pub count: usize,
}

impl HistogramBin {
    fn new(start: f64, end: f64, count: usize) -> Self {
        Self {
            start,
            end,
            label: format!("{start:.1}\u{2013}{end:.1}"),
            count,
        }
    }
}

/// Splits the observed range of `values` into `bins` equal-width bins.
///
/// Constant data has no width to split, so it comes back as a single bin
/// `[v, v]` holding every value. Empty input yields no bins.
pub fn build_histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(SimulationError::ZeroBins);
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= 0.0 {
        return Ok(vec![HistogramBin::new(min, max, values.len())]);
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let index = ((value - min) / width).floor() as usize;
        counts[index.min(bins - 1)] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| {
            let start = min + index as f64 * width;
            let end = min + (index + 1) as f64 * width;
            HistogramBin::new(start, end, count)
        })
        .collect())
}
