//! I/O operations for benchmark reports.
//!
//! This module reads benchmark reports from the filesystem and writes
//! rendered comparisons to any writer.

use crate::error::{BenchdiffError, Result};
use crate::parse;
use crate::set::BenchmarkSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

pub use crate::render::{write_report, OutputFormat};

/// Read and parse a benchmark report file.
pub fn read_set(path: impl AsRef<Path>) -> Result<BenchmarkSet> {
    let path = path.as_ref();
    let io_err = |source| BenchdiffError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let set = parse::parse_set(BufReader::new(file)).map_err(io_err)?;
    debug!(path = %path.display(), names = set.len(), "read benchmark report");
    Ok(set)
}

/// Read a report and, when requested, reduce repeats to their best run.
pub fn read_set_with(path: impl AsRef<Path>, best_of_repeats: bool) -> Result<BenchmarkSet> {
    let mut set = read_set(path)?;
    if best_of_repeats {
        crate::best::select_best(&mut set);
    }
    Ok(set)
}
