use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoDbError>;

#[derive(Debug, Error)]
pub enum GeoDbError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GeoDbError {
    fn from(err: reqwest::Error) -> Self {
        GeoDbError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GeoDbError {
    fn from(err: serde_json::Error) -> Self {
        GeoDbError::Parse(err.to_string())
    }
}
