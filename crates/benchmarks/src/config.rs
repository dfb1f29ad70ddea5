// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comparison options.
//!
//! Options can be read from a TOML file:
//!
//! ```toml
//! changed_only = true
//! sort_by_magnitude = false
//! best_of_repeats = true
//! fail_on_tolerance_exceeded = true
//!
//! [tolerances]
//! ns_per_op = 5.0
//! bytes_per_op = 10.0
//! ```

use crate::error::{BenchdiffError, Result};
use crate::sort::SortOrder;
use crate::tolerance::{ToleranceGate, Tolerances};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything that shapes a comparison besides the two inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Only report rows whose displayed delta is non-zero.
    pub changed_only: bool,
    /// Order rows by magnitude of change instead of report order.
    pub sort_by_magnitude: bool,
    /// Collapse repeated runs to their fastest observation first.
    pub best_of_repeats: bool,
    /// Fail when a delta exceeds its tolerance.
    pub fail_on_tolerance_exceeded: bool,
    /// Per-family tolerances, only meaningful with the gate enabled.
    pub tolerances: Tolerances,
}

impl CompareOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BenchdiffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| BenchdiffError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the options are consistent before any input is read.
    pub fn validate(&self) -> Result<()> {
        if !self.fail_on_tolerance_exceeded && self.tolerances.any_set() {
            return Err(BenchdiffError::config(
                "tolerance flags are only valid when failing on deltas is enabled",
            ));
        }
        self.tolerances.validate()
    }

    /// Row ordering selected by these options.
    pub fn sort_order(&self) -> SortOrder {
        if self.sort_by_magnitude {
            SortOrder::Magnitude
        } else {
            SortOrder::Original
        }
    }

    /// Tolerance gate selected by these options.
    pub fn gate(&self) -> ToleranceGate {
        if self.fail_on_tolerance_exceeded {
            ToleranceGate::enabled(self.tolerances)
        } else {
            ToleranceGate::disabled()
        }
    }
}
