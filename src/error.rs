use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid trip payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
