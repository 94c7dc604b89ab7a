//! HTTP From Source - Command-line tool for generating `.http` request files.
//!
//! This binary scans a Spring Boot project for annotated controllers and writes
//! one request document per controller, ready to run in any `.http` client.
//!
//! # Usage
//!
//! ```bash
//! http-from-source [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Generate documents for every controller into `http-requests/`:
//! ```bash
//! http-from-source ./my-service
//! ```
//!
//! Print one endpoint's request:
//! ```bash
//! http-from-source ./my-service -c src/main/java/com/example/UserController.java -e getUser
//! ```
//!
//! Dump parsed controllers as JSON:
//! ```bash
//! http-from-source ./my-service -f json
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! http-from-source ./my-service -v
//! ```

use anyhow::Result;
use clap::Parser;
use http_from_source::cli;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("HTTP From Source starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    Ok(())
}
