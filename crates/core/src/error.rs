use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Campaign fetch error: {0}")]
    Fetch(String),

    #[error("Campaign API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Campaign not found: {0}")]
    NotFound(String),

    #[error("Campaign validation error: {0}")]
    Validation(String),

    #[error("Theme store error: {0}")]
    Theme(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
