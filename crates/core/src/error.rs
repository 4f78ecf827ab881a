use thiserror::Error;

/// Rejections raised by case intake validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaseError {
    #[error("Patient age out of range: {0} (expected 0-150)")]
    AgeOutOfRange(u8),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
