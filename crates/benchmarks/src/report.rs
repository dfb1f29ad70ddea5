// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-metric comparison tables.
//!
//! The same pipeline runs once per entry of [`Metric::ALL`]: order the pairs,
//! skip those that do not measure the metric, compute the delta, apply the
//! changed-only filter, then let the tolerance gate inspect the row. When the
//! gate fires the report stops growing and records the violation; the rows
//! produced up to that point stay in the report so they can still be shown.

use crate::config::CompareOptions;
use crate::correlate::DiffRecord;
use crate::delta::Delta;
use crate::record::Metric;
use crate::sort::sort_diffs;
use crate::tolerance::ToleranceViolation;
use serde::Serialize;
use tracing::debug;

/// One benchmark's line in a metric table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row<'a> {
    /// Benchmark name.
    pub name: &'a str,
    /// Comparison of the metric.
    pub delta: Delta,
    #[serde(skip)]
    pair: DiffRecord<'a>,
}

impl Row<'_> {
    /// The four display cells: name, old value, new value, delta or multiple.
    pub fn cells(&self) -> [String; 4] {
        let metric = self.delta.metric;
        [
            self.name.to_string(),
            metric.format(self.pair.before).unwrap_or_default(),
            metric.format(self.pair.after).unwrap_or_default(),
            self.delta.display(),
        ]
    }
}

/// All rows reported for one metric family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable<'a> {
    /// Metric family of every row.
    pub metric: Metric,
    /// Rows in display order.
    pub rows: Vec<Row<'a>>,
}

/// The rendered-to-be result of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report<'a> {
    /// Non-empty tables in metric order.
    pub tables: Vec<MetricTable<'a>>,
    /// First tolerance violation, if the gate fired.
    pub violation: Option<ToleranceViolation>,
}

impl<'a> Report<'a> {
    /// Build tables for every metric from correlated pairs.
    pub fn build(diffs: &[DiffRecord<'a>], options: &CompareOptions) -> Self {
        let mut report = Report::default();
        let mut ordered = diffs.to_vec();
        let gate = options.gate();

        for metric in Metric::ALL {
            sort_diffs(&mut ordered, options.sort_order(), metric);
            let mut rows = Vec::new();

            for diff in &ordered {
                let Some(delta) = diff.delta(metric) else {
                    continue;
                };
                if options.changed_only && !delta.changed() {
                    continue;
                }
                rows.push(Row {
                    name: diff.name(),
                    delta,
                    pair: *diff,
                });
                if let Some(violation) = gate.check(diff.name(), &delta) {
                    debug!(
                        benchmark = diff.name(),
                        %metric,
                        "tolerance exceeded, stopping report"
                    );
                    report.violation = Some(violation);
                    break;
                }
            }

            if !rows.is_empty() {
                report.tables.push(MetricTable { metric, rows });
            }
            if report.violation.is_some() {
                break;
            }
        }

        debug!(
            tables = report.tables.len(),
            rows = report.row_count(),
            "built comparison report"
        );
        report
    }

    /// Table for `metric`, if it has any rows.
    pub fn table(&self, metric: Metric) -> Option<&MetricTable<'a>> {
        self.tables.iter().find(|t| t.metric == metric)
    }

    /// Total rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    /// Whether the tolerance gate fired.
    pub fn failed(&self) -> bool {
        self.violation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BenchmarkRecord;
    use crate::tolerance::Tolerances;

    fn pair(i: usize, before: BenchmarkRecord, after: BenchmarkRecord) -> (BenchmarkRecord, BenchmarkRecord) {
        let name = format!("Benchmark{i}");
        let mut before = before;
        let mut after = after;
        before.name = name.clone();
        before.ordinal = i;
        after.name = name;
        after.ordinal = i;
        (before, after)
    }

    fn blank() -> BenchmarkRecord {
        BenchmarkRecord::new("", 1, 0)
    }

    fn fixture() -> Vec<(BenchmarkRecord, BenchmarkRecord)> {
        vec![
            pair(
                0,
                blank().with_ns_per_op(100.0).with_allocs_per_op(2),
                blank().with_ns_per_op(100.0).with_allocs_per_op(4),
            ),
            pair(
                1,
                blank().with_ns_per_op(50.0).with_mb_per_s(10.0),
                blank().with_ns_per_op(25.0).with_mb_per_s(20.0),
            ),
            pair(2, blank(), blank()),
        ]
    }

    fn diffs(pairs: &[(BenchmarkRecord, BenchmarkRecord)]) -> Vec<DiffRecord<'_>> {
        pairs.iter().map(|(b, a)| DiffRecord::new(b, a)).collect()
    }

    #[test]
    fn test_tables_only_for_measured_metrics() {
        let pairs = fixture();
        let report = Report::build(&diffs(&pairs), &CompareOptions::default());
        let metrics: Vec<_> = report.tables.iter().map(|t| t.metric).collect();
        assert_eq!(metrics, vec![Metric::NsPerOp, Metric::MbPerS, Metric::AllocsPerOp]);
        assert_eq!(report.table(Metric::NsPerOp).unwrap().rows.len(), 2);
        assert_eq!(report.table(Metric::MbPerS).unwrap().rows.len(), 1);
        assert!(report.table(Metric::AllocedBytesPerOp).is_none());
        assert!(!report.failed());
    }

    #[test]
    fn test_changed_only_filters_rows() {
        let pairs = fixture();
        let options = CompareOptions {
            changed_only: true,
            ..CompareOptions::default()
        };
        let report = Report::build(&diffs(&pairs), &options);
        let ns = report.table(Metric::NsPerOp).unwrap();
        assert_eq!(ns.rows.len(), 1);
        assert_eq!(ns.rows[0].name, "Benchmark1");
    }

    #[test]
    fn test_row_cells() {
        let pairs = fixture();
        let report = Report::build(&diffs(&pairs), &CompareOptions::default());
        let mbs = report.table(Metric::MbPerS).unwrap();
        assert_eq!(
            mbs.rows[0].cells(),
            [
                "Benchmark1".to_string(),
                "10.00".to_string(),
                "20.00".to_string(),
                "2.00x".to_string()
            ]
        );
    }

    #[test]
    fn test_allocation_cells_keep_integer_precision() {
        let before = BenchmarkRecord::new("BenchmarkBig", 1, 0).with_alloced_bytes_per_op(u64::MAX - 1);
        let after = BenchmarkRecord::new("BenchmarkBig", 1, 0).with_alloced_bytes_per_op(u64::MAX);
        let diffs = [DiffRecord::new(&before, &after)];
        let report = Report::build(&diffs, &CompareOptions::default());
        let cells = report.table(Metric::AllocedBytesPerOp).unwrap().rows[0].cells();
        assert_eq!(cells[1], "18446744073709551614");
        assert_eq!(cells[2], "18446744073709551615");
    }

    #[test]
    fn test_gate_stops_after_offending_row() {
        let pairs = fixture();
        let options = CompareOptions {
            fail_on_tolerance_exceeded: true,
            tolerances: Tolerances {
                ns_per_op: 60.0,
                mb_per_s: 50.0,
                ..Tolerances::default()
            },
            ..CompareOptions::default()
        };
        let report = Report::build(&diffs(&pairs), &options);
        let violation = report.violation.as_ref().unwrap();
        assert_eq!(violation.benchmark, "Benchmark1");
        assert_eq!(violation.delta.metric, Metric::MbPerS);
        assert_eq!(report.tables.len(), 2);
        assert!(report.table(Metric::AllocsPerOp).is_none());
    }

    #[test]
    fn test_magnitude_sort_is_per_metric() {
        let pairs = vec![
            pair(
                0,
                blank().with_ns_per_op(100.0).with_allocs_per_op(1),
                blank().with_ns_per_op(101.0).with_allocs_per_op(10),
            ),
            pair(
                1,
                blank().with_ns_per_op(100.0).with_allocs_per_op(1),
                blank().with_ns_per_op(200.0).with_allocs_per_op(1),
            ),
        ];
        let options = CompareOptions {
            sort_by_magnitude: true,
            ..CompareOptions::default()
        };
        let report = Report::build(&diffs(&pairs), &options);
        let ns: Vec<_> = report.table(Metric::NsPerOp).unwrap().rows.iter().map(|r| r.name).collect();
        let allocs: Vec<_> = report.table(Metric::AllocsPerOp).unwrap().rows.iter().map(|r| r.name).collect();
        assert_eq!(ns, vec!["Benchmark1", "Benchmark0"]);
        assert_eq!(allocs, vec!["Benchmark0", "Benchmark1"]);
    }
}
