//! Specgen: spec-driven GDScript module generator.
//!
//! This is the main entry point for the `specgen` CLI. It parses arguments,
//! resolves configuration, runs the generation pipeline for the requested
//! module, and handles errors with proper exit codes.
//!
//! One invocation processes exactly one module: its section is extracted
//! from `spec/modules.md`, sent to the generation service, and the reply is
//! written as `game/<module>.gd` and `tests/test_<module>.gd`.

mod artifact;
mod cli;
mod client;
mod config;
mod error;
mod exit_codes;
mod fs;
mod pipeline;
mod prompt;
mod reply;
mod spec;

use cli::Cli;
use client::OpenAiClient;
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> error::Result<()> {
    // Credential resolution comes first: a missing key must abort before
    // the spec document is even read.
    let config = Config::from_env()?;
    let client = OpenAiClient::new(&config.api_key, &config.model);

    let paths = pipeline::run(&config, &client, &cli.module)?;

    println!("Wrote module code:  {}", paths.code_path.display());
    println!("Wrote module tests: {}", paths.test_path.display());
    Ok(())
}
