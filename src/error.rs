use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse viewer config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("render surface error: {0}")]
    Surface(String),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
