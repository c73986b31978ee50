//! `pdparse <file.pdf>`: print the parsed document as JSON on stdout.
//!
//! Fatal problems (no argument, missing file, not a PDF) print
//! `{"error": ...}` and exit 1. An unreadable PDF is not fatal; the
//! default-shaped document comes back with its `parsing_errors` filled in.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use pdparse_core::config::load_dotenv;
use pdparse_core::{Config, PdError};
use pdparse_extract::parse_pdf;

#[derive(Parser, Debug)]
#[command(name = "pdparse", version, about = "Extract curriculum data from a program document PDF")]
struct Args {
    /// Path to the PDF to parse.
    file: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "error": format!("{e:#}") }));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let path = args
        .file
        .as_deref()
        .ok_or_else(|| PdError::Other("No file path provided".to_string()))?;
    if !path.is_file() {
        return Err(PdError::FileNotFound(path.display().to_string()).into());
    }
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PdError::UnsupportedFile(path.display().to_string()))?;

    load_dotenv();
    let config = Config::from_env();
    debug!(file = %path.display(), profile = config.profile_label(), "Parsing");

    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse_pdf(&bytes, filename, &config.parser)?;

    let json = if args.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    Ok(json)
}
