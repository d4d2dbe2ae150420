//! Error types for pickup-clusters
//!
//! The clustering core itself never fails; these cover the surfaces around
//! it (config, customer store, output, HTTP).

use thiserror::Error;

/// Main error type for pickup-clusters operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Customer store error: {0}")]
    Store(String),

    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for pickup-clusters operations
pub type Result<T> = std::result::Result<T, Error>;
