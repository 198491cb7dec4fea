use thiserror::Error;

use crate::types::OverlayId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Overlay not found: {0}")]
    OverlayNotFound(OverlayId),

    #[error("Overlay id already in use: {0}")]
    IdInUse(OverlayId),

    #[error("Overlap detected on row {0}")]
    OverlapDetected(u32),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, CoreError>;
