use std::fmt;

use serde::Serialize;

use crate::error::{Result, SimulationError};
use crate::trial::round_up_cents;

/// Percentile reported alongside the mean.
const PERCENTILE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub mean: f64,
    pub percentile_90: f64,
    /// Percent of trials whose acres needed exceed the vacant land, one
    /// decimal place.
    pub exceedance_rate: f64,
    pub total_scenarios: usize,
}

impl SimulationSummary {
    pub fn exceedance_label(&self) -> String {
        format!("{:.1}", self.exceedance_rate)
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean Additional Acres Needed: {:.2} acres", self.mean)?;
        writeln!(
            f,
            "90th Percentile Additional Acres Needed: {:.2} acres",
            self.percentile_90
        )?;
        writeln!(
            f,
            "Scenarios Exceeding Current Vacant Land: {}%",
            self.exceedance_label()
        )?;
        write!(f, "Based on {} simulated scenarios", self.total_scenarios)
    }
}

/// Sorts `acres` in place and derives the summary statistics.
///
/// The 90th percentile is nearest-rank: `sorted[floor(n * 0.9)]`, no
/// interpolation.
pub fn summarize(acres: &mut [f64], vacant_land: f64) -> Result<SimulationSummary> {
    if acres.is_empty() {
        return Err(SimulationError::NoTrials);
    }
    acres.sort_by(f64::total_cmp);

    let count = acres.len();
    let sum: f64 = acres.iter().sum();
    let mean = round_up_cents(sum / count as f64);

    let rank = ((count as f64 * PERCENTILE).floor() as usize).min(count - 1);
    let percentile_90 = round_up_cents(acres[rank]);

    Ok(SimulationSummary {
        mean,
        percentile_90,
        exceedance_rate: exceedance_rate(acres, vacant_land),
        total_scenarios: count,
    })
}

/// Percent of values strictly greater than `vacant_land`, rounded to one
/// decimal. Zero for an empty slice.
pub fn exceedance_rate(acres: &[f64], vacant_land: f64) -> f64 {
    if acres.is_empty() {
        return 0.0;
    }
    let exceeding = acres.iter().filter(|&&value| value > vacant_land).count();
    let percent = exceeding as f64 / acres.len() as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(summarize(&mut [], 10.0), Err(SimulationError::NoTrials));
    }

    #[test]
    fn percentile_uses_floor_nearest_rank() {
        let mut acres: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let summary = summarize(&mut acres, 100.0).unwrap();
        // floor(10 * 0.9) = 9 -> the largest value
        assert_eq!(summary.percentile_90, 10.0);
        assert_eq!(summary.mean, 5.5);
        assert_eq!(acres[0], 1.0, "input is left sorted");
    }

    #[test]
    fn percentile_for_twenty_values() {
        let mut acres: Vec<f64> = (0..20).map(f64::from).collect();
        let summary = summarize(&mut acres, 100.0).unwrap();
        // floor(20 * 0.9) = 18
        assert_eq!(summary.percentile_90, 18.0);
    }

    #[test]
    fn mean_rounds_up_to_cents() {
        let mut acres = vec![0.01, 0.01, 0.02];
        let summary = summarize(&mut acres, 1.0).unwrap();
        // 0.04 / 3 = 0.01333.. -> 0.02
        assert_eq!(summary.mean, 0.02);
    }

    #[test]
    fn single_value_summary() {
        let mut acres = vec![3.5];
        let summary = summarize(&mut acres, 3.0).unwrap();
        assert_eq!(summary.mean, 3.5);
        assert_eq!(summary.percentile_90, 3.5);
        assert_eq!(summary.exceedance_rate, 100.0);
        assert_eq!(summary.total_scenarios, 1);
    }

    #[test]
    fn exceedance_is_strict_and_one_decimal() {
        assert_eq!(exceedance_rate(&[1.0, 2.0, 3.0], 2.0), 33.3);
        assert_eq!(exceedance_rate(&[1.0, 2.0, 3.0], 0.5), 100.0);
        assert_eq!(exceedance_rate(&[1.0, 2.0, 3.0], 3.0), 0.0);
        assert_eq!(exceedance_rate(&[1.0, 2.0, 3.0], 1.0), 66.7);
    }

    #[test]
    fn display_matches_results_panel() {
        let summary = SimulationSummary {
            mean: 12.0,
            percentile_90: 20.5,
            exceedance_rate: 0.0,
            total_scenarios: 10_000,
        };
        let text = summary.to_string();
        assert!(text.contains("Mean Additional Acres Needed: 12.00 acres"));
        assert!(text.contains("90th Percentile Additional Acres Needed: 20.50 acres"));
        assert!(text.contains("Scenarios Exceeding Current Vacant Land: 0.0%"));
        assert!(text.contains("Based on 10000 simulated scenarios"));
    }
}
