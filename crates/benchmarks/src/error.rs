// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the comparison engine.

use crate::correlate::CorrelationWarning;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop a comparison.
#[derive(Debug, Error)]
pub enum BenchdiffError {
    /// The report file could not be opened or read.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path of the report that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Options are inconsistent (e.g. tolerances without the gate).
    #[error("{0}")]
    Config(String),

    /// A configuration file could not be decoded.
    #[error("invalid configuration file {}", path.display())]
    ConfigFile {
        /// Path of the configuration file.
        path: PathBuf,
        /// Decoder failure.
        #[source]
        source: toml::de::Error,
    },

    /// No benchmark name could be paired between the two inputs.
    #[error("no repeated benchmarks")]
    NoRepeatedBenchmarks {
        /// Why each name went unpaired.
        warnings: Vec<CorrelationWarning>,
    },

    /// A delta exceeded its configured tolerance while the gate was enabled.
    #[error("{benchmark}: {delta} {unit} delta exceeds tolerance of {tolerance:.2}%")]
    ToleranceExceeded {
        /// Benchmark whose delta tripped the gate.
        benchmark: String,
        /// Unit label of the metric family.
        unit: &'static str,
        /// Displayed delta.
        delta: String,
        /// Tolerance configured for the metric family.
        tolerance: f64,
    },

    /// Rendering a report as JSON failed.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a rendered report failed.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

impl BenchdiffError {
    /// Build a configuration error.
    pub fn config<T: Into<String>>(msg: T) -> Self {
        BenchdiffError::Config(msg.into())
    }

    /// Whether this error comes from option validation rather than from comparing inputs.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            BenchdiffError::Config(_) | BenchdiffError::ConfigFile { .. }
        )
    }
}

/// Reasons a single report line is not accepted as a benchmark observation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer than the name and iteration count columns.
    #[error("two fields required, have {0}")]
    TooFewFields(usize),

    /// First column is not a benchmark name.
    #[error("first field does not start with \"Benchmark\"")]
    NotABenchmark,

    /// Iteration count is not an unsigned integer.
    #[error("invalid iteration count {0:?}")]
    InvalidIterations(String),
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, BenchdiffError>;
