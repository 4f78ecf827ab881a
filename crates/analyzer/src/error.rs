//! Analysis error handling

use clinical_core::CaseError;
use thiserror::Error;

/// Failures that stop a case from being analyzed.
///
/// An incomplete report is not an error; these only cover a case that was
/// rejected or a model call that produced nothing to extract from.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("ANTHROPIC_API_KEY not configured")]
    NotConfigured,

    #[error("Invalid case: {0}")]
    InvalidCase(#[from] CaseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Claude API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No text content in response")]
    EmptyResponse,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
