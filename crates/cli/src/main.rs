//! benchdiff CLI entry point.

fn main() {
    if let Err(e) = benchdiff_cli::run() {
        eprintln!("benchdiff: {e:#}");
        std::process::exit(benchdiff_cli::exit_code(&e));
    }
}
