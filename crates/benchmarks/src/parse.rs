// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parser for plain-text benchmark reports.
//!
//! A benchmark line looks like
//!
//! ```text
//! BenchmarkDecode-8    50000    31250 ns/op    40.96 MB/s    4096 B/op    3 allocs/op
//! ```
//!
//! i.e. a name starting with `Benchmark`, an iteration count, then any number
//! of `<value> <unit>` pairs. Every other line of the report (`PASS`, `ok`,
//! `goos:` headers, test output) is ignored.

use crate::error::ParseError;
use crate::record::BenchmarkRecord;
use crate::set::BenchmarkSet;
use std::io::BufRead;
use tracing::{debug, trace};

/// Parse one report line into a record with the given ordinal.
pub fn parse_line(line: &str, ordinal: usize) -> Result<BenchmarkRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(ParseError::TooFewFields(fields.len()));
    }
    if !fields[0].starts_with("Benchmark") {
        return Err(ParseError::NotABenchmark);
    }
    let iterations = fields[1]
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidIterations(fields[1].to_string()))?;

    let mut record = BenchmarkRecord::new(fields[0], iterations, ordinal);
    for pair in fields[2..].chunks_exact(2) {
        apply_measurement(&mut record, pair[0], pair[1]);
    }
    Ok(record)
}

/// Record a `<value> <unit>` pair; unknown units and malformed values are skipped.
fn apply_measurement(record: &mut BenchmarkRecord, value: &str, unit: &str) {
    match unit {
        "ns/op" => {
            if let Ok(v) = value.parse::<f64>() {
                record.ns_per_op = Some(v);
            }
        }
        "MB/s" => {
            if let Ok(v) = value.parse::<f64>() {
                record.mb_per_s = Some(v);
            }
        }
        "B/op" => {
            if let Ok(v) = value.parse::<u64>() {
                record.alloced_bytes_per_op = Some(v);
            }
        }
        "allocs/op" => {
            if let Ok(v) = value.parse::<u64>() {
                record.allocs_per_op = Some(v);
            }
        }
        _ => {}
    }
}

/// Parse a whole report. Only I/O failures are errors; lines that are not
/// benchmark observations are skipped, including lines that are not UTF-8.
pub fn parse_set<R: BufRead>(reader: R) -> std::io::Result<BenchmarkSet> {
    let mut set = BenchmarkSet::new();
    let mut ordinal = 0;
    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        match parse_line(line.trim_end_matches('\r'), ordinal) {
            Ok(record) => {
                set.push(record);
                ordinal += 1;
            }
            Err(err) => trace!(line = lineno + 1, %err, "skipping report line"),
        }
    }
    debug!(
        records = set.record_count(),
        names = set.len(),
        "parsed benchmark report"
    );
    Ok(set)
}
