//! Error types for vires-core

use thiserror::Error;

/// Result type alias for token bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Token bootstrap error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read env file: {0}")]
    EnvFile(String),

    #[error("Client config error: {0}")]
    Config(String),

    #[error("Token prompt failed: {0}")]
    Prompt(String),

    #[error("Token registration failed: {0}")]
    Registration(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
