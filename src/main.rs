// src/main.rs
mod config;
mod document;
mod engine;
mod extractors;
mod output;
mod utils;

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use config::{ParserConfig, SectionKind};
use engine::StatementEngine;
use utils::AppError;

/// Command Line Interface for the statement transaction extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the statement PDF
    #[arg(allow_hyphen_values = true)]
    pdf_path: Option<PathBuf>,

    /// Statement section to extract
    #[arg(long, value_enum, default_value_t = SectionKind::ClosedPositions)]
    section: SectionKind,

    /// Pretty-print the JSON envelope
    #[arg(long)]
    pretty: bool,

    /// Debug mode - save an annotated dump of the section lines
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug dumps
    #[arg(long, default_value = "./debug")]
    debug_dir: PathBuf,

    /// Arguments after the document path are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var, writes to stderr)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments. Usage errors still answer with a JSON envelope
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return usage_error(e),
    };
    tracing::debug!("Starting with args: {:?}", args);
    if !args.extra.is_empty() {
        tracing::debug!("Ignoring {} extra argument(s)", args.extra.len());
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn usage_error(err: clap::Error) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }

    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    let message = first_line.strip_prefix("error: ").unwrap_or(first_line).trim();
    tracing::error!("Invalid arguments: {}", message);

    if let Err(e) = output::write_error_envelope(&mut io::stdout().lock(), message) {
        tracing::error!("{}", e);
    }
    ExitCode::FAILURE
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    let mut stdout = io::stdout().lock();

    let Some(pdf_path) = args.pdf_path else {
        output::write_missing_path(&mut stdout)?;
        return Ok(ExitCode::FAILURE);
    };

    // 3. Build the immutable run configuration
    let debug_dir = args.debug.then_some(args.debug_dir);
    let config = ParserConfig::for_section(args.section).with_debug_dir(debug_dir);

    // 4. Parse the document; failures come back as envelopes, not errors
    let engine = StatementEngine::new(config);
    let result = engine.parse_path(&pdf_path);
    tracing::info!(
        "Processing finished. Success: {}, Transactions: {}",
        result.success,
        result.transaction_count
    );

    output::write_result(&mut stdout, &result, args.pretty)?;
    Ok(ExitCode::SUCCESS)
}
