// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ordinal binning of numeric columns.
//!
//! Values are binned at quantiles so each bin holds roughly the same
//! number of rows. When heavy duplication makes two quantile edges equal,
//! binning falls back to equal width bins over the value range. Bins are
//! right closed, and the first bin also includes its lower edge.

use crate::error::{ArmError, Result};
use ordered_float::OrderedFloat;
use tracing::warn;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Binning {
    Quantile,
    EqualWidth,
}

#[derive(Clone, Debug)]
pub struct Discretized<'a> {
    pub labels: Vec<&'a str>,
    pub binning: Binning,
    pub edges: Vec<f64>,
}

/// Assigns each value one of `bin_labels`, lowest values first.
pub fn discretize<'a>(values: &[f64], bin_labels: &[&'a str]) -> Result<Discretized<'a>> {
    let bins = bin_labels.len();
    if bins == 0 {
        return Err(ArmError::InvalidParameter {
            name: "bins",
            value: 0.0,
            reason: "at least one bin label is required",
        });
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ArmError::InvalidInput(
            "cannot bin non-finite values".to_owned(),
        ));
    }
    if values.is_empty() {
        return Ok(Discretized {
            labels: vec![],
            binning: Binning::Quantile,
            edges: vec![],
        });
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by_key(|&value| OrderedFloat(value));

    let quantile = quantile_edges(&sorted, bins);
    let (binning, edges) = if strictly_increasing(&quantile) {
        (Binning::Quantile, quantile)
    } else {
        warn!(
            bins,
            "Quantile bin edges are not unique, falling back to equal width bins"
        );
        (Binning::EqualWidth, equal_width_edges(&sorted, bins))
    };

    let labels = values
        .iter()
        .map(|&value| bin_labels[bin_of(value, &edges)])
        .collect();
    Ok(Discretized {
        labels,
        binning,
        edges,
    })
}

// Quantiles at 0, 1/bins, ..., 1, linearly interpolated between ranks.
fn quantile_edges(sorted: &[f64], bins: usize) -> Vec<f64> {
    let last = (sorted.len() - 1) as f64;
    (0..=bins)
        .map(|i| {
            let position = last * i as f64 / bins as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        })
        .collect()
}

// Evenly spaced edges over [min, max]. The lowest edge moves down by 0.1%
// of the range so the minimum falls inside the first bin; a constant column
// gets a range of 0.1% of its magnitude on either side.
fn equal_width_edges(sorted: &[f64], bins: usize) -> Vec<f64> {
    let mut min = sorted[0];
    let mut max = sorted[sorted.len() - 1];
    let constant = min == max;
    if constant {
        let adjust = if min == 0.0 { 0.001 } else { 0.001 * min.abs() };
        min -= adjust;
        max += adjust;
    }
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    edges[bins] = max;
    if !constant {
        edges[0] -= (max - min) * 0.001;
    }
    edges
}

fn strictly_increasing(edges: &[f64]) -> bool {
    edges.windows(2).all(|pair| pair[0] < pair[1])
}

fn bin_of(value: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    // First bin whose upper edge is >= value.
    let bin = edges[1..].partition_point(|&edge| edge < value);
    bin.min(bins - 1)
}

#[cfg(test)]
mod tests {
    use super::{discretize, Binning};
    use crate::error::ArmError;

    static PRICE_LABELS: [&str; 3] = ["Rent_Low", "Rent_Medium", "Rent_High"];

    #[test]
    fn test_quantile_bins() {
        let values = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0];
        let binned = discretize(&values, &PRICE_LABELS).unwrap();
        assert_eq!(binned.binning, Binning::Quantile);
        assert_eq!(
            binned.labels,
            vec![
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_Medium",
                "Rent_Medium",
                "Rent_Medium",
                "Rent_High",
                "Rent_High",
                "Rent_High",
            ]
        );
        assert_eq!(binned.edges.len(), 4);
        assert_eq!(binned.edges[0], 100.0);
        assert_eq!(binned.edges[3], 900.0);
    }

    #[test]
    fn test_quantile_bins_keep_input_order() {
        let values = [900.0, 100.0, 500.0];
        let binned = discretize(&values, &PRICE_LABELS).unwrap();
        assert_eq!(binned.labels, vec!["Rent_High", "Rent_Low", "Rent_Medium"]);
    }

    #[test]
    fn test_equal_width_fallback() {
        // Over a third of the values are identical, so two quantile
        // edges coincide.
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 10.0];
        let binned = discretize(&values, &PRICE_LABELS).unwrap();
        assert_eq!(binned.binning, Binning::EqualWidth);
        // Edges at 1-0.009, 4, 7, 10.
        assert_eq!(
            binned.labels,
            vec![
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_Low",
                "Rent_High",
            ]
        );
        assert!((binned.edges[0] - 0.991).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column() {
        let values = [5.0, 5.0, 5.0];
        let binned = discretize(&values, &PRICE_LABELS).unwrap();
        assert_eq!(binned.binning, Binning::EqualWidth);
        assert_eq!(binned.labels, vec!["Rent_Medium"; 3]);
    }

    #[test]
    fn test_edge_cases() {
        assert!(discretize(&[], &PRICE_LABELS).unwrap().labels.is_empty());
        assert!(matches!(
            discretize(&[1.0], &[]),
            Err(ArmError::InvalidParameter { .. })
        ));
        assert!(matches!(
            discretize(&[1.0, std::f64::NAN], &PRICE_LABELS),
            Err(ArmError::InvalidInput(_))
        ));
    }
}
