// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pairing of "before" and "after" observations.
//!
//! Names are matched exactly. Repeated observations under one name are paired
//! by position, up to the shorter of the two runs. Names that only one side
//! reported, or that were repeated a different number of times, produce a
//! [`CorrelationWarning`] but never stop the comparison.

use crate::delta::Delta;
use crate::record::{BenchmarkRecord, Metric};
use crate::set::BenchmarkSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A before/after pair believed to be the same logical benchmark.
///
/// Borrows both records from their sets, so it cannot outlive either.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffRecord<'a> {
    /// Observation from the "before" run.
    pub before: &'a BenchmarkRecord,
    /// Observation from the "after" run.
    pub after: &'a BenchmarkRecord,
}

impl<'a> DiffRecord<'a> {
    /// Pair two observations of the same benchmark.
    pub fn new(before: &'a BenchmarkRecord, after: &'a BenchmarkRecord) -> Self {
        debug_assert_eq!(before.name, after.name);
        Self { before, after }
    }

    /// Benchmark name shared by both sides.
    pub fn name(&self) -> &'a str {
        &self.before.name
    }

    /// Position of the "before" observation in its report.
    pub fn ordinal(&self) -> usize {
        self.before.ordinal
    }

    /// Whether both sides reported `metric`.
    pub fn measured(&self, metric: Metric) -> bool {
        self.before.measured(metric) && self.after.measured(metric)
    }

    /// Delta for `metric`, or `None` when either side did not report it.
    pub fn delta(&self, metric: Metric) -> Option<Delta> {
        let before = metric.value(self.before)?;
        let after = metric.value(self.after)?;
        Some(Delta::new(metric, before, after))
    }
}

/// A benchmark name that could not be fully correlated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrelationWarning {
    /// Reported before but not after.
    Missing {
        /// Benchmark name.
        name: String,
    },
    /// Reported after but not before.
    New {
        /// Benchmark name.
        name: String,
    },
    /// Reported on both sides a different number of times.
    CountMismatch {
        /// Benchmark name.
        name: String,
        /// Observations in the "before" run.
        before: usize,
        /// Observations in the "after" run.
        after: usize,
    },
}

impl CorrelationWarning {
    /// Name the warning is about.
    pub fn name(&self) -> &str {
        match self {
            CorrelationWarning::Missing { name }
            | CorrelationWarning::New { name }
            | CorrelationWarning::CountMismatch { name, .. } => name,
        }
    }
}

impl fmt::Display for CorrelationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationWarning::Missing { name } => {
                write!(f, "benchmark {name} is missing from after")
            }
            CorrelationWarning::New { name } => write!(f, "benchmark {name} is new in after"),
            CorrelationWarning::CountMismatch {
                name,
                before,
                after,
            } => write!(
                f,
                "benchmark {name}: before has {before} instances, after has {after}; comparing the first {}",
                before.min(after)
            ),
        }
    }
}

/// Output of [`correlate`].
#[derive(Debug, Clone, Default)]
pub struct Correlation<'a> {
    /// Pairs ordered by the "before" ordinal.
    pub diffs: Vec<DiffRecord<'a>>,
    /// Names that could not be fully paired.
    pub warnings: Vec<CorrelationWarning>,
}

impl Correlation<'_> {
    /// Whether no benchmark was paired at all.
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// Match every benchmark in `before` with its counterpart in `after`.
///
/// An empty result is not an error here; the caller decides whether a
/// comparison with nothing in common is fatal.
pub fn correlate<'a>(before: &'a BenchmarkSet, after: &'a BenchmarkSet) -> Correlation<'a> {
    let mut correlation = Correlation::default();

    for (name, before_records) in before.groups() {
        let Some(after_records) = after.get(name) else {
            correlation.warnings.push(CorrelationWarning::Missing {
                name: name.to_string(),
            });
            continue;
        };
        if before_records.len() != after_records.len() {
            correlation.warnings.push(CorrelationWarning::CountMismatch {
                name: name.to_string(),
                before: before_records.len(),
                after: after_records.len(),
            });
        }
        correlation.diffs.extend(
            before_records
                .iter()
                .zip(after_records)
                .map(|(b, a)| DiffRecord::new(b, a)),
        );
    }

    for name in after.names_in_order() {
        if !before.contains(name) {
            correlation.warnings.push(CorrelationWarning::New {
                name: name.to_string(),
            });
        }
    }

    correlation.diffs.sort_by_key(DiffRecord::ordinal);
    debug!(
        pairs = correlation.diffs.len(),
        warnings = correlation.warnings.len(),
        "correlated benchmark runs"
    );
    correlation
}
