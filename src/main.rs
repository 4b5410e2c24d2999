// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

mod cli;
use cli::{commands, display, inspect, Cli, Commands};

/// Diagnostics go to stderr so stdout stays clean for `--json` and `fmt`.
fn init_tracing() {
    let filter = std::env::var("SPHINDEX_LOG").unwrap_or_else(|_| "warn".to_string());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));
    // A subscriber is already installed when running under a test harness.
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Inspect { file, top } => inspect::inspect_file(&file, top),
        Commands::Verify { file, strict } => commands::verify_file(&file, strict),
        Commands::Search {
            file,
            query,
            limit,
            scorer,
            json,
        } => commands::search_file(&file, &query, limit, scorer.as_deref(), json),
        Commands::Build {
            input,
            output,
            incremental,
        } => commands::build(&input, &output, incremental),
        Commands::Fmt {
            file,
            output,
            check,
        } => commands::fmt(&file, output.as_deref(), check),
        Commands::Stem { words } => commands::stem(&words),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", display::error(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}
