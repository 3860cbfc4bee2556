use crate::domain::Source;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Feed {feed} returned HTTP {status}")]
    Fetch { feed: Source, status: StatusCode },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid report: {0}")]
    Report(String),
    #[error("Aggregation failed: {0}")]
    Aggregation(String),
}

pub type Result<T> = std::result::Result<T, HubError>;
