//! Benchmark comparison engine for benchdiff.
//!
//! This crate pairs the observations of two benchmark runs ("before" and
//! "after"), computes per-metric deltas and decides whether they exceed a
//! configured tolerance.
//!
//! # Quick Start
//!
//! ```no_run
//! use benchdiff_benchmarks::{correlate, io, CompareOptions, Report};
//!
//! let options = CompareOptions::default();
//! let before = io::read_set_with("old.txt", options.best_of_repeats)?;
//! let after = io::read_set_with("new.txt", options.best_of_repeats)?;
//!
//! let correlation = correlate(&before, &after);
//! for warning in &correlation.warnings {
//!     eprintln!("{warning}");
//! }
//!
//! let report = Report::build(&correlation.diffs, &options);
//! io::write_report(&mut std::io::stdout(), io::OutputFormat::Text, &report, &[])?;
//! # Ok::<(), benchdiff_benchmarks::BenchdiffError>(())
//! ```
//!
//! # Modules
//!
//! - [`record`] - Benchmark observations and metric descriptors
//! - [`set`] - Name-indexed collection of observations
//! - [`parse`] - Plain-text report parser
//! - [`best`] - Best-of-repeats reduction
//! - [`correlate`] - Pairing of before/after observations
//! - [`delta`] - Relative change of one metric
//! - [`tolerance`] - Per-metric tolerance gate
//! - [`sort`] - Display ordering
//! - [`report`] - Per-metric tables
//! - [`render`] / [`markdown`] - Output formats
//! - [`io`] - Reading reports and writing output

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod best;
pub mod config;
pub mod correlate;
pub mod delta;
pub mod error;
pub mod io;
pub mod markdown;
pub mod parse;
pub mod record;
pub mod render;
pub mod report;
pub mod set;
pub mod sort;
pub mod tolerance;

pub use best::select_best;
pub use config::CompareOptions;
pub use correlate::{correlate, Correlation, CorrelationWarning, DiffRecord};
pub use delta::Delta;
pub use error::{BenchdiffError, ParseError, Result};
pub use record::{BenchmarkRecord, Metric, Polarity};
pub use report::{MetricTable, Report, Row};
pub use set::BenchmarkSet;
pub use sort::SortOrder;
pub use tolerance::{ToleranceGate, ToleranceViolation, Tolerances};

/// Compare two parsed reports end to end.
///
/// Applies best-of-repeats if enabled (mutating both sets), correlates them
/// and builds the report. Returns the correlation warnings alongside the
/// report; fails with [`BenchdiffError::NoRepeatedBenchmarks`], carrying the
/// warnings, when nothing could be paired. A tolerance violation is carried in the report rather
/// than returned as an error so the partial output can still be rendered.
pub fn compare<'a>(
    before: &'a mut BenchmarkSet,
    after: &'a mut BenchmarkSet,
    options: &CompareOptions,
) -> Result<(Vec<CorrelationWarning>, Report<'a>)> {
    options.validate()?;
    if options.best_of_repeats {
        select_best(before);
        select_best(after);
    }
    let before: &'a BenchmarkSet = before;
    let after: &'a BenchmarkSet = after;
    let correlation = correlate(before, after);
    if correlation.is_empty() {
        return Err(BenchdiffError::NoRepeatedBenchmarks {
            warnings: correlation.warnings,
        });
    }
    let report = Report::build(&correlation.diffs, options);
    Ok((correlation.warnings, report))
}
