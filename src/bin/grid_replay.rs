//! CLI tool for editgrid - replays a scripted editing session headlessly
//!
//! Usage:
//!   grid_replay <script.json>              # Output report JSON to stdout
//!   grid_replay <script.json> -o out.json  # Output report JSON to file
//!
//! Set `RUST_LOG=editgrid=debug` to trace editor transitions on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use editgrid::replay::run_file;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: grid_replay <script.json> [-o report.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Replay
    let report = match run_file(Path::new(input_path)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error replaying {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &report) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(report.as_bytes()).unwrap();
            println!();
        }
    }
}
