//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "clinical-analyzer",
    version,
    about = "Render patient cases into prompts and extract clinical reports from model output"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the prompt that would be sent for a case.
    Render {
        /// Case description as JSON.
        #[arg(value_name = "CASE_JSON")]
        case: PathBuf,
    },

    /// Extract a clinical report from a saved model response.
    Extract {
        /// Raw model response text.
        #[arg(value_name = "RESPONSE_TXT")]
        response: PathBuf,
    },

    /// Analyze a case with Claude (requires ANTHROPIC_API_KEY).
    Analyze {
        /// Case description as JSON.
        #[arg(value_name = "CASE_JSON")]
        case: PathBuf,
    },
}
