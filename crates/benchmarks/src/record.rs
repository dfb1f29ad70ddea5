// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark observations and the metric families measured on them.
//!
//! A [`BenchmarkRecord`] is one line of a benchmark report. Every metric is
//! optional: `None` means "not measured", which is distinct from a measured
//! zero. [`Metric`] describes the four families the engine compares and is
//! the single place that knows how to extract, format and label each one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One observation of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Benchmark name as printed in the report; not unique within a set.
    pub name: String,
    /// Iteration count the harness settled on.
    pub iterations: u64,
    /// Position of this observation in the source report.
    pub ordinal: usize,
    /// Nanoseconds per operation.
    pub ns_per_op: Option<f64>,
    /// Throughput in megabytes per second.
    pub mb_per_s: Option<f64>,
    /// Allocations per operation.
    pub allocs_per_op: Option<u64>,
    /// Bytes allocated per operation.
    pub alloced_bytes_per_op: Option<u64>,
}

impl BenchmarkRecord {
    /// Create a record with no metrics measured.
    pub fn new(name: impl Into<String>, iterations: u64, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            iterations,
            ordinal,
            ns_per_op: None,
            mb_per_s: None,
            allocs_per_op: None,
            alloced_bytes_per_op: None,
        }
    }

    /// Set nanoseconds per operation.
    pub fn with_ns_per_op(mut self, ns: f64) -> Self {
        self.ns_per_op = Some(ns);
        self
    }

    /// Set throughput.
    pub fn with_mb_per_s(mut self, mbs: f64) -> Self {
        self.mb_per_s = Some(mbs);
        self
    }

    /// Set allocations per operation.
    pub fn with_allocs_per_op(mut self, allocs: u64) -> Self {
        self.allocs_per_op = Some(allocs);
        self
    }

    /// Set bytes allocated per operation.
    pub fn with_alloced_bytes_per_op(mut self, bytes: u64) -> Self {
        self.alloced_bytes_per_op = Some(bytes);
        self
    }

    /// Whether the given metric was reported for this observation.
    pub fn measured(&self, metric: Metric) -> bool {
        metric.value(self).is_some()
    }
}

impl fmt::Display for BenchmarkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.iterations)?;
        for metric in Metric::ALL {
            if let Some(value) = metric.format(self) {
                write!(f, " {} {}", value, metric.unit())?;
            }
        }
        Ok(())
    }
}

/// Direction in which a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Smaller values are better (time, allocations).
    LowerIsBetter,
    /// Larger values are better (throughput).
    HigherIsBetter,
}

/// The metric families compared between runs, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// `ns/op`
    NsPerOp,
    /// `MB/s`
    MbPerS,
    /// `allocs/op`
    AllocsPerOp,
    /// `B/op`
    AllocedBytesPerOp,
}

impl Metric {
    /// All metric families, in the order their tables are reported.
    pub const ALL: [Metric; 4] = [
        Metric::NsPerOp,
        Metric::MbPerS,
        Metric::AllocsPerOp,
        Metric::AllocedBytesPerOp,
    ];

    /// Unit label as it appears in benchmark reports.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::NsPerOp => "ns/op",
            Metric::MbPerS => "MB/s",
            Metric::AllocsPerOp => "allocs/op",
            Metric::AllocedBytesPerOp => "B/op",
        }
    }

    /// Label used in tolerance messages.
    pub fn family(self) -> &'static str {
        match self {
            Metric::NsPerOp => "ns/op",
            Metric::MbPerS => "MB/s",
            Metric::AllocsPerOp => "allocs/op",
            Metric::AllocedBytesPerOp => "bytes/op",
        }
    }

    /// Which direction counts as an improvement.
    pub fn polarity(self) -> Polarity {
        match self {
            Metric::MbPerS => Polarity::HigherIsBetter,
            _ => Polarity::LowerIsBetter,
        }
    }

    /// Column headers of this metric's table.
    pub fn headers(self) -> [&'static str; 4] {
        match self {
            Metric::NsPerOp => ["benchmark", "old ns/op", "new ns/op", "delta"],
            Metric::MbPerS => ["benchmark", "old MB/s", "new MB/s", "speedup"],
            Metric::AllocsPerOp => ["benchmark", "old allocs", "new allocs", "delta"],
            Metric::AllocedBytesPerOp => ["benchmark", "old bytes", "new bytes", "delta"],
        }
    }

    /// Whether the last column shows `after / before` instead of a percentage.
    pub fn reports_multiple(self) -> bool {
        self == Metric::MbPerS
    }

    /// Extract this metric from a record.
    pub fn value(self, record: &BenchmarkRecord) -> Option<f64> {
        match self {
            Metric::NsPerOp => record.ns_per_op,
            Metric::MbPerS => record.mb_per_s,
            Metric::AllocsPerOp => record.allocs_per_op.map(|v| v as f64),
            Metric::AllocedBytesPerOp => record.alloced_bytes_per_op.map(|v| v as f64),
        }
    }

    /// Format this metric of `record` for display, if it was reported.
    ///
    /// Allocation counts are printed from their integer value.
    pub fn format(self, record: &BenchmarkRecord) -> Option<String> {
        match self {
            Metric::NsPerOp => record.ns_per_op.map(format_ns),
            Metric::MbPerS => record.mb_per_s.map(|v| format!("{v:.2}")),
            Metric::AllocsPerOp => record.allocs_per_op.map(|v| v.to_string()),
            Metric::AllocedBytesPerOp => record.alloced_bytes_per_op.map(|v| v.to_string()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

/// Format a nanosecond timing with as much precision as is legible:
/// two decimals below 10, one below 100, none otherwise.
pub fn format_ns(ns: f64) -> String {
    let precision = if ns < 10.0 {
        2
    } else if ns < 100.0 {
        1
    } else {
        0
    };
    format!("{:.precision$}", round_half_away(ns, precision))
}

/// Round to `decimals` places with halves rounded away from zero, so a
/// value printed as `7.345` displays as `7.35` rather than the binary
/// neighbour's `7.34`.
pub(crate) fn round_half_away(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = (value * scale).round();
    if scaled.is_finite() {
        scaled / scale
    } else {
        value
    }
}
