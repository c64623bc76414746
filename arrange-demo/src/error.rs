use arrange::prelude::{ConfigError, DragError, SortError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid table config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sort(#[from] SortError),

    #[error(transparent)]
    Drag(#[from] DragError),
}
