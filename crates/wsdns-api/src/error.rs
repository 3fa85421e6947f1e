//! Websupport API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Websupport API returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid record name: {0:?}")]
    InvalidName(String),

    #[error("Authenticator has not been prepared with credentials")]
    NotPrepared,
}

pub type Result<T> = std::result::Result<T, ApiError>;
