// Copyright 2025 Benchdiff Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report rendering.

use crate::correlate::CorrelationWarning;
use crate::markdown;
use crate::report::{MetricTable, Report};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Spaces added after the widest cell of each column.
const COLUMN_PADDING: usize = 5;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned plain text.
    #[default]
    Text,
    /// Markdown tables.
    Markdown,
    /// Pretty-printed JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Write the plain-text tables.
///
/// Every column but the last is padded to its widest cell, each table is
/// aligned on its own, and tables are separated by a blank line.
pub fn write_text<W: Write>(out: &mut W, report: &Report<'_>) -> io::Result<()> {
    for (i, table) in report.tables.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_text_table(out, table)?;
    }
    Ok(())
}

fn write_text_table<W: Write>(out: &mut W, table: &MetricTable<'_>) -> io::Result<()> {
    let mut lines: Vec<[String; 4]> = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.metric.headers().map(str::to_string));
    lines.extend(table.rows.iter().map(|row| row.cells()));

    let mut widths = [0usize; 3];
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for line in &lines {
        for (width, cell) in widths.iter().zip(line.iter()) {
            let pad = width + COLUMN_PADDING - cell.chars().count();
            write!(out, "{cell}{:pad$}", "")?;
        }
        writeln!(out, "{}", line[3])?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonDocument<'r, 'a> {
    warnings: Vec<String>,
    #[serde(flatten)]
    report: &'r Report<'a>,
}

/// Write the report and warnings as a JSON document.
pub fn write_json<W: Write>(
    out: &mut W,
    report: &Report<'_>,
    warnings: &[CorrelationWarning],
) -> serde_json::Result<()> {
    let doc = JsonDocument {
        warnings: warnings.iter().map(ToString::to_string).collect(),
        report,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Write a report in `format`.
pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &Report<'_>,
    warnings: &[CorrelationWarning],
) -> crate::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, report)?,
        OutputFormat::Markdown => markdown::write_markdown(out, report, warnings)?,
        OutputFormat::Json => write_json(out, report, warnings)?,
    }
    Ok(())
}
