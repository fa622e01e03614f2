//! Summary statistics and histograms for simulation outputs.

use serde::Serialize;

/// Basic distribution summary of a batch of observations.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Summarize a slice of observations. Empty input yields NaN fields.
pub fn summarize(values: &[f64]) -> SummaryStats {
    let n = values.len();
    if n == 0 {
        return SummaryStats {
            count: 0,
            mean: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            median: f64::NAN,
        };
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    let median = sorted[n / 2];

    SummaryStats {
        count: n,
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
        median,
    }
}

/// One fixed-width histogram bin: `[lo, hi)`, last bin closed.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

/// Fixed-width histogram over the observed range of `values`.
///
/// Degenerate input (empty, or all values equal) collapses to a single bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![HistogramBin {
            lo: min,
            hi: max,
            count: values.len() as u64,
        }];
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Tally non-negative integer observations into counts indexed by value.
///
/// `tally(&[3, 5, 3])` gives `[0, 0, 0, 2, 0, 1]`.
pub fn tally(values: &[u32]) -> Vec<u64> {
    let max = values.iter().copied().max().unwrap_or(0) as usize;
    let mut counts = vec![0u64; max + 1];
    for &v in values {
        counts[v as usize] += 1;
    }
    counts
}
