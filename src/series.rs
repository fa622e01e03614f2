//! Paired theory/experiment series and data-file export.
//!
//! Every sweep-style experiment produces the same shape of data: for each
//! value of the swept parameter, a closed-form prediction and a Monte Carlo
//! estimate. `ComparisonSeries` holds those triples and writes them out as
//! pretty JSON or CSV for external plotting.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One swept point: parameter value, exact prediction, simulated estimate.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComparisonPoint {
    pub param: f64,
    pub theory: f64,
    pub empirical: f64,
}

/// A full sweep of paired (parameter, theory, empirical) samples.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSeries {
    pub label: String,
    pub param_name: String,
    pub points: Vec<ComparisonPoint>,
}

impl ComparisonSeries {
    pub fn new(label: &str, param_name: &str) -> Self {
        ComparisonSeries {
            label: label.to_string(),
            param_name: param_name.to_string(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, param: f64, theory: f64, empirical: f64) {
        self.points.push(ComparisonPoint {
            param,
            theory,
            empirical,
        });
    }

    /// Largest |theory - empirical| over the series (NaN-free points only).
    pub fn max_abs_error(&self) -> f64 {
        self.points
            .iter()
            .map(|p| (p.theory - p.empirical).abs())
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) {
        save_json(self, path);
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) {
        let file = File::create(path).expect("Failed to create series CSV file");
        let mut w = BufWriter::new(file);
        writeln!(w, "{},theory,empirical", self.param_name).unwrap();
        for pt in &self.points {
            writeln!(w, "{},{},{}", pt.param, pt.theory, pt.empirical).unwrap();
        }
    }
}

/// Write any serializable result as pretty JSON.
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) {
    let json = serde_json::to_string_pretty(value).expect("Failed to serialize results");
    std::fs::write(path, json).expect("Failed to write results file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_max_error() {
        let mut series = ComparisonSeries::new("test", "p");
        series.push(0.1, 0.5, 0.52);
        series.push(0.2, 0.4, 0.35);
        assert_eq!(series.points.len(), 2);
        assert!((series.max_abs_error() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_max_error_skips_nan() {
        let mut series = ComparisonSeries::new("test", "p");
        series.push(0.1, f64::NAN, 0.5);
        series.push(0.2, 0.4, 0.41);
        assert!((series.max_abs_error() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_json_round_trip_shape() {
        let mut series = ComparisonSeries::new("ruin", "p");
        series.push(0.5, 0.5, 0.49);
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.contains("\"param_name\":\"p\""));
        assert!(json.contains("\"points\""));
    }
}
