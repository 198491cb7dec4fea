use thiserror::Error;

/// Failures outside the parse-report channel. Malformed caption input is
/// never one of these; it is reported through [`crate::ParseReport`].
#[derive(Debug, Error)]
pub enum CaptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no sentences found in script")]
    NoSentences,

    #[error("words per minute must be greater than zero")]
    InvalidRate,
}

pub type Result<T> = std::result::Result<T, CaptionsError>;
