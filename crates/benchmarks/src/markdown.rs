//! Markdown output generation for comparison reports.
//!
//! This module renders a [`Report`] as one markdown section per metric
//! family, suitable for pasting into pull requests or CI summaries.

use crate::correlate::CorrelationWarning;
use crate::report::{MetricTable, Report};
use std::io::{self, Write};

/// Write a markdown report.
pub fn write_markdown<W: Write>(
    out: &mut W,
    report: &Report<'_>,
    warnings: &[CorrelationWarning],
) -> io::Result<()> {
    writeln!(out, "# Benchmark Comparison")?;
    writeln!(out)?;
    writeln!(out, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(out)?;

    if !warnings.is_empty() {
        writeln!(out, "## Warnings")?;
        writeln!(out)?;
        for warning in warnings {
            writeln!(out, "- {}", escape(&warning.to_string()))?;
        }
        writeln!(out)?;
    }

    for table in &report.tables {
        write_table(out, table)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "Compared rows: {}", report.row_count())?;
    if let Some(violation) = &report.violation {
        writeln!(out)?;
        writeln!(
            out,
            "**Tolerance exceeded:** `{}` {} {} (tolerance {:.2}%)",
            violation.benchmark,
            violation.delta.percent_str(),
            violation.delta.metric.family(),
            violation.tolerance
        )?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, table: &MetricTable<'_>) -> io::Result<()> {
    let headers = table.metric.headers();
    writeln!(out, "## {}", table.metric.unit())?;
    writeln!(out)?;
    writeln!(out, "| {} |", headers.join(" | "))?;
    writeln!(out, "|-----------|------:|------:|------:|")?;
    for row in &table.rows {
        let [name, before, after, delta] = row.cells();
        writeln!(out, "| {} | {} | {} | {} |", escape(&name), before, after, delta)?;
    }
    writeln!(out)
}

/// Escape characters that would break a pipe table.
fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
