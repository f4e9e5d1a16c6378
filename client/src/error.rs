use reqwest::StatusCode;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-success status; `message` is the server's `error` field when it
    /// sent one, the raw body otherwise.
    #[error("{message} ({status})")]
    Server { status: StatusCode, message: String },

    #[error("You must log in first!")]
    NotLoggedIn,

    #[error("Invalid server URL `{0}`")]
    InvalidBaseUrl(String),

    #[error("{name} must be {expected}, got `{value}`")]
    InvalidInput {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Input closed")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}
