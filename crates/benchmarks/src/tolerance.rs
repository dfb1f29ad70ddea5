// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-metric tolerance gate.

use crate::delta::Delta;
use crate::error::BenchdiffError;
use crate::record::Metric;
use serde::{Deserialize, Serialize};

/// Allowed absolute percentage change for each metric family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tolerances {
    /// Tolerance for `ns/op` deltas.
    pub ns_per_op: f64,
    /// Tolerance for `MB/s` deltas.
    pub mb_per_s: f64,
    /// Tolerance for `allocs/op` deltas.
    pub allocs_per_op: f64,
    /// Tolerance for `B/op` deltas.
    pub bytes_per_op: f64,
}

impl Tolerances {
    /// Tolerance configured for `metric`.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::NsPerOp => self.ns_per_op,
            Metric::MbPerS => self.mb_per_s,
            Metric::AllocsPerOp => self.allocs_per_op,
            Metric::AllocedBytesPerOp => self.bytes_per_op,
        }
    }

    /// Whether any family has a non-default tolerance.
    pub fn any_set(&self) -> bool {
        Metric::ALL.iter().any(|m| self.get(*m) != 0.0)
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> Result<(), BenchdiffError> {
        for metric in Metric::ALL {
            let value = self.get(metric);
            if !value.is_finite() || value < 0.0 {
                return Err(BenchdiffError::config(format!(
                    "tolerance for {} must be a non-negative number, got {value}",
                    metric.family()
                )));
            }
        }
        Ok(())
    }
}

/// A delta that exceeded its family's tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToleranceViolation {
    /// Benchmark that tripped the gate.
    pub benchmark: String,
    /// Offending delta.
    pub delta: Delta,
    /// Tolerance it exceeded.
    pub tolerance: f64,
}

impl From<ToleranceViolation> for BenchdiffError {
    fn from(v: ToleranceViolation) -> Self {
        BenchdiffError::ToleranceExceeded {
            benchmark: v.benchmark,
            unit: v.delta.metric.family(),
            delta: v.delta.percent_str(),
            tolerance: v.tolerance,
        }
    }
}

/// Fails a comparison when a delta's magnitude exceeds its tolerance.
///
/// A disabled gate never fires. The comparison uses the displayed (rounded)
/// percentage, so with the default tolerance of zero any row reported as
/// changed fails.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToleranceGate {
    enabled: bool,
    tolerances: Tolerances,
}

impl ToleranceGate {
    /// Gate that fires on deltas beyond `tolerances`.
    pub fn enabled(tolerances: Tolerances) -> Self {
        Self {
            enabled: true,
            tolerances,
        }
    }

    /// Gate that never fires.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether the gate can fire.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check one delta of `benchmark`.
    pub fn check(&self, benchmark: &str, delta: &Delta) -> Option<ToleranceViolation> {
        if !self.enabled {
            return None;
        }
        let tolerance = self.tolerances.get(delta.metric);
        let exceeded = match delta.rounded_percent() {
            Some(p) if p.is_finite() => p.abs() > tolerance,
            _ => true,
        };
        exceeded.then(|| ToleranceViolation {
            benchmark: benchmark.to_string(),
            delta: *delta,
            tolerance,
        })
    }
}
