use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate layer id: {0}")]
    DuplicateLayerId(u32),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("config emitter is not running")]
    EmitterStopped,
}

pub type Result<T> = std::result::Result<T, RenderError>;
