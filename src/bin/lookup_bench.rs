//! Nested lookup benchmark runner.
//!
//! Times every accessor against freshly built fixtures and prints how each
//! compares to the baseline.
//!
//! Usage: `cargo run --release --bin lookup-bench -- [--repeats N] [--json]`

use std::io;

use lookup_benchmarks::config::{wants_help, USAGE};
use lookup_benchmarks::{run, BenchConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if wants_help(&args) {
        println!("{}", USAGE);
        return;
    }

    let config = BenchConfig::from_args(args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("{}", USAGE);
        std::process::exit(2);
    });

    let stdout = io::stdout();
    if let Err(e) = run(&config, &mut stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
