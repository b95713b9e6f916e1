//! Ellie API backend
//!
//! Blocking client for the two calls the importer makes against the modeling
//! service: listing folders (which doubles as the connection test) and creating
//! a model. Calls are made once; there is no retry and no timeout beyond the
//! transport default.

pub mod client;

pub use client::{CreatedModel, EllieClient, Folder, base_url, parse_created_model, parse_folders};

/// Error talking to the modeling service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error connecting to Ellie: {status}")]
    ConnectionFailed { status: u16 },
    #[error("Failed to create model: {status} {body}")]
    SubmissionFailed { status: u16, body: String },
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.to_string())
    }
}
