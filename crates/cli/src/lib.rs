//! CLI for benchdiff.
//!
//! This crate provides the `benchdiff` command, which compares two
//! benchmark reports and prints per-metric delta tables.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use benchdiff_benchmarks::io::{self, OutputFormat};
use benchdiff_benchmarks::{compare, BenchdiffError, CompareOptions, CorrelationWarning};
use clap::{ArgAction, Parser};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE_FOOTER: &str = "\
Each input file should be from:
    go test -run=NONE -bench=. > [old,new].txt

benchdiff compares old and new for each benchmark.

If -test.benchmem=true is added to the \"go test\" command
benchdiff will also compare memory allocations.";

/// Compare two benchmark reports.
#[derive(Parser, Debug)]
#[command(name = "benchdiff")]
#[command(author, version, about, long_about = None, after_help = USAGE_FOOTER)]
pub struct Cli {
    /// Report from the baseline revision.
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// Report from the revision under test.
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Show only benchmarks that have changed.
    #[arg(long)]
    pub changed: bool,

    /// Sort benchmarks by magnitude of change.
    #[arg(long)]
    pub mag: bool,

    /// Compare best times from old and new.
    #[arg(long)]
    pub best: bool,

    /// Exit with an error if a delta exceeds its tolerance.
    #[arg(long)]
    pub errdelta: bool,

    /// Tolerance in percent for deltas of ns/op.
    #[arg(long, value_name = "PERCENT")]
    pub tnsop: Option<f64>,

    /// Tolerance in percent for deltas of MB/s.
    #[arg(long, value_name = "PERCENT")]
    pub tmbs: Option<f64>,

    /// Tolerance in percent for deltas of allocs/op.
    #[arg(long, value_name = "PERCENT")]
    pub tallocop: Option<f64>,

    /// Tolerance in percent for deltas of bytes/op.
    #[arg(long, value_name = "PERCENT")]
    pub tbop: Option<f64>,

    /// Output format: text, markdown, or json.
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML file with default comparison options.
    #[arg(long, env = "BENCHDIFF_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Merge the configuration file (if any) with command-line flags.
    ///
    /// Flags only switch options on; tolerance flags replace file values.
    pub fn options(&self) -> std::result::Result<CompareOptions, BenchdiffError> {
        let mut options = match &self.config {
            Some(path) => CompareOptions::load(path).map_err(|err| match err {
                BenchdiffError::Io { path, source } => BenchdiffError::config(format!(
                    "cannot read config file {}: {source}",
                    path.display()
                )),
                other => other,
            })?,
            None => CompareOptions::default(),
        };

        options.changed_only |= self.changed;
        options.sort_by_magnitude |= self.mag;
        options.best_of_repeats |= self.best;
        options.fail_on_tolerance_exceeded |= self.errdelta;

        let tolerances = &mut options.tolerances;
        for (flag, slot) in [
            (self.tnsop, &mut tolerances.ns_per_op),
            (self.tmbs, &mut tolerances.mb_per_s),
            (self.tallocop, &mut tolerances.allocs_per_op),
            (self.tbop, &mut tolerances.bytes_per_op),
        ] {
            if let Some(value) = flag {
                *slot = value;
            }
        }
        Ok(options)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the comparison fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(&cli)
}

/// Run one comparison described by `cli`.
///
/// Correlation warnings go to stderr before any table. Tables are flushed
/// to stdout before a tolerance violation is returned as an error.
pub fn execute(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    options.validate()?;
    debug!(?options, format = %cli.format, "starting comparison");

    let mut before = io::read_set(&cli.old)?;
    let mut after = io::read_set(&cli.new)?;

    let (warnings, report) = match compare(&mut before, &mut after, &options) {
        Ok(comparison) => comparison,
        Err(err) => {
            if let BenchdiffError::NoRepeatedBenchmarks { warnings } = &err {
                print_warnings(warnings);
            }
            return Err(err.into());
        }
    };
    print_warnings(&warnings);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    io::write_report(&mut out, cli.format, &report, &warnings)?;
    out.flush().context("failed to flush output")?;

    match report.violation {
        Some(violation) => Err(BenchdiffError::from(violation).into()),
        None => Ok(()),
    }
}

fn print_warnings(warnings: &[CorrelationWarning]) {
    for warning in warnings {
        eprintln!("{warning}");
    }
}

/// Process exit code for a failed run: 2 for option errors, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BenchdiffError>() {
        Some(e) if e.is_config() => 2,
        _ => 1,
    }
}
