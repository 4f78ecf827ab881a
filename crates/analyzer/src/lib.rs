//! clinical-analyzer library crate
//!
//! Connects the `clinical-core` engine to the Claude Messages API:
//! a case is rendered into a prompt, sent to the model, and the reply is
//! extracted into a `ClinicalReport`. The binary entrypoint is in `main.rs`.

pub mod ai;
pub mod analysis;
pub mod config;
pub mod error;

pub use ai::ClaudeClient;
pub use analysis::{CaseAnalysis, analyze_case};
pub use config::Config;
pub use error::AnalysisError;
