//! clinical-analyzer: command-line entrypoint.

mod cli;

use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinical_analyzer::{AnalysisError, ClaudeClient, Config, analyze_case};
use clinical_core::{CaseDescription, extract, render};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Command::Render { case } => {
            let case = read_case(&case)?;
            println!("{}", render(&case));
        }
        Command::Extract { response } => {
            let text = std::fs::read_to_string(response)?;
            let report = extract(&text);
            let missing = report.missing_sections();
            if !missing.is_empty() {
                tracing::warn!(missing = ?missing, "Report extracted with missing sections");
            }
            print_json(&report, cli.pretty)?;
        }
        Command::Analyze { case } => {
            let config = Config::from_env();
            let client = ClaudeClient::from_config(&config)?;
            let case = read_case(&case)?;
            let analysis = analyze_case(&client, &case).await?;
            print_json(&analysis, cli.pretty)?;
        }
    }
    Ok(())
}

fn read_case(path: &Path) -> Result<CaseDescription, AnalysisError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AnalysisError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
