//! Error types for the Fordefi CLI

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Fordefi CLI
#[derive(Error, Debug)]
pub enum Error {
    // Key handling errors
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Insecure key permissions: {0}")]
    InsecureKey(String),

    // Request signing errors
    #[error("Request signing failed: {0}")]
    Signing(String),

    // Input validation errors
    #[error("Invalid EVM address: {0}")]
    InvalidAddress(String),

    #[error("Invalid vault id: {0}")]
    InvalidVaultId(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // API errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Fordefi API error {status}: {body}")]
    Api { status: u16, body: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
