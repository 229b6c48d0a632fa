use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoLensError>;

#[derive(Debug, Error)]
pub enum GeoLensError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeoLensError {
    /// Status code carried by an `Api` error, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeoLensError::Api { status, .. } => Some(*status),
            GeoLensError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeoLensError {
    fn from(err: reqwest::Error) -> Self {
        GeoLensError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GeoLensError {
    fn from(err: serde_json::Error) -> Self {
        GeoLensError::Parse(err.to_string())
    }
}
