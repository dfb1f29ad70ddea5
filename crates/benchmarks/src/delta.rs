// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Relative change of one metric between two observations.

use crate::record::{round_half_away, Metric, Polarity};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Comparison of one metric across a before/after pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    /// Metric family compared.
    pub metric: Metric,
    /// Value in the "before" run.
    pub before: f64,
    /// Value in the "after" run.
    pub after: f64,
}

impl Delta {
    /// Compare `before` and `after` values of `metric`.
    pub fn new(metric: Metric, before: f64, after: f64) -> Self {
        Self {
            metric,
            before,
            after,
        }
    }

    /// `after / before`. Two zeros compare as equal (1.0); a zero baseline
    /// with a non-zero result has no meaningful ratio and yields `None`.
    pub fn ratio(&self) -> Option<f64> {
        if self.before != 0.0 {
            Some(self.after / self.before)
        } else if self.after == 0.0 {
            Some(1.0)
        } else {
            None
        }
    }

    /// Signed change in percent: 12.3 for a 12.3% increase.
    pub fn percent(&self) -> Option<f64> {
        self.ratio().map(|r| r * 100.0 - 100.0)
    }

    /// Percentage as displayed (two decimals); `None` when not comparable.
    pub fn rounded_percent(&self) -> Option<f64> {
        self.percent().map(|p| {
            let rounded = round_half_away(p, 2);
            if rounded == 0.0 {
                0.0
            } else {
                rounded
            }
        })
    }

    /// Whether the two values can be compared as a ratio.
    pub fn comparable(&self) -> bool {
        self.ratio().is_some()
    }

    /// Whether the change is visible in the displayed percentage.
    ///
    /// A delta that displays as `+0.00%` is unchanged even if the raw ratio
    /// differs from one. A non-comparable delta is always a change.
    pub fn changed(&self) -> bool {
        match self.rounded_percent() {
            Some(p) => p != 0.0,
            None => true,
        }
    }

    /// Whether the change moved the metric in its better direction.
    pub fn improved(&self) -> bool {
        if !self.changed() {
            return false;
        }
        match self.metric.polarity() {
            Polarity::LowerIsBetter => self.after < self.before,
            Polarity::HigherIsBetter => self.after > self.before,
        }
    }

    /// Absolute change used for magnitude ordering; non-comparable deltas
    /// rank above everything else.
    pub fn magnitude(&self) -> f64 {
        match self.percent() {
            Some(p) if !p.is_nan() => p.abs(),
            _ => f64::INFINITY,
        }
    }

    /// Percentage formatted like `+12.30%` or `-4.00%`.
    pub fn percent_str(&self) -> String {
        match self.rounded_percent() {
            Some(p) => format!("{p:+.2}%"),
            None => "n/a".to_string(),
        }
    }

    /// Ratio formatted like `1.80x`.
    pub fn multiple_str(&self) -> String {
        match self.ratio() {
            Some(r) => format!("{:.2}x", round_half_away(r, 2)),
            None => "n/a".to_string(),
        }
    }

    /// Text shown in the last column of this metric's table.
    pub fn display(&self) -> String {
        if self.metric.reports_multiple() {
            self.multiple_str()
        } else {
            self.percent_str()
        }
    }
}

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Delta", 6)?;
        state.serialize_field("metric", &self.metric)?;
        state.serialize_field("before", &self.before)?;
        state.serialize_field("after", &self.after)?;
        state.serialize_field("percent", &self.rounded_percent())?;
        state.serialize_field("changed", &self.changed())?;
        state.serialize_field("improved", &self.improved())?;
        state.end()
    }
}
