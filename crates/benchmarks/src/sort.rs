// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Display ordering of paired benchmarks.

use crate::correlate::DiffRecord;
use crate::record::Metric;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How rows of a metric table are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Order of first appearance in the "before" report.
    #[default]
    Original,
    /// Largest absolute change first.
    Magnitude,
}

/// Sort `diffs` for the table of `metric`.
///
/// Both orders are stable and break ties by original order. Pairs that do
/// not measure `metric` rank as unchanged under magnitude order.
pub fn sort_diffs(diffs: &mut [DiffRecord<'_>], order: SortOrder, metric: Metric) {
    match order {
        SortOrder::Original => diffs.sort_by_key(DiffRecord::ordinal),
        SortOrder::Magnitude => diffs.sort_by(|a, b| {
            magnitude(b, metric)
                .partial_cmp(&magnitude(a, metric))
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.ordinal().cmp(&b.ordinal()))
        }),
    }
}

fn magnitude(diff: &DiffRecord<'_>, metric: Metric) -> f64 {
    diff.delta(metric).map_or(0.0, |d| d.magnitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BenchmarkRecord;

    fn records(values: &[(f64, f64)]) -> Vec<(BenchmarkRecord, BenchmarkRecord)> {
        values
            .iter()
            .enumerate()
            .map(|(i, (b, a))| {
                let name = format!("Benchmark{i}");
                (
                    BenchmarkRecord::new(&name, 1, i).with_ns_per_op(*b),
                    BenchmarkRecord::new(&name, 1, i).with_ns_per_op(*a),
                )
            })
            .collect()
    }

    #[test]
    fn test_magnitude_order_descending_with_stable_ties() {
        let pairs = records(&[(100.0, 101.0), (100.0, 50.0), (100.0, 99.0), (100.0, 150.0)]);
        let mut diffs: Vec<_> = pairs.iter().map(|(b, a)| DiffRecord::new(b, a)).collect();
        sort_diffs(&mut diffs, SortOrder::Magnitude, Metric::NsPerOp);
        let ordinals: Vec<_> = diffs.iter().map(DiffRecord::ordinal).collect();
        assert_eq!(ordinals, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_original_order_restores_ordinals() {
        let pairs = records(&[(1.0, 2.0), (1.0, 9.0), (1.0, 1.0)]);
        let mut diffs: Vec<_> = pairs.iter().rev().map(|(b, a)| DiffRecord::new(b, a)).collect();
        sort_diffs(&mut diffs, SortOrder::Original, Metric::MbPerS);
        let ordinals: Vec<_> = diffs.iter().map(DiffRecord::ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_unmeasured_metric_keeps_original_order() {
        let pairs = records(&[(1.0, 2.0), (1.0, 9.0)]);
        let mut diffs: Vec<_> = pairs.iter().map(|(b, a)| DiffRecord::new(b, a)).collect();
        sort_diffs(&mut diffs, SortOrder::Magnitude, Metric::AllocsPerOp);
        let ordinals: Vec<_> = diffs.iter().map(DiffRecord::ordinal).collect();
        assert_eq!(ordinals, vec![0, 1]);
    }
}
