use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum OpsGateError {
    // Durable storage errors
    StorageError(String),

    // Serialization errors
    SerializationError(String),

    // Transport errors
    NetworkError(String),
    BackendRejected { status: u16, message: String },

    // Configuration errors
    ConfigError(String),
}

impl fmt::Display for OpsGateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::BackendRejected { status, message } => {
                write!(f, "Backend rejected request ({}): {}", status, message)
            }
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for OpsGateError {}

impl From<reqwest::Error> for OpsGateError {
    fn from(err: reqwest::Error) -> Self {
        OpsGateError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for OpsGateError {
    fn from(err: serde_json::Error) -> Self {
        OpsGateError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for OpsGateError {
    fn from(err: std::io::Error) -> Self {
        OpsGateError::StorageError(err.to_string())
    }
}

// Generic result type for OpsGate
pub type Result<T> = std::result::Result<T, OpsGateError>;
