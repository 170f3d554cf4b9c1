//! Error types for the HTTP service.
//!
//! ## Error Cases
//! - `IdGeneration`: the generator failed (e.g., its time field overflowed).
//! - `Worker`: the blocking task running the generator panicked or was
//!   cancelled.
//! - `InvalidId`: the client supplied an ID outside the 63-bit range.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::task::JoinError;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the HTTP service.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying ID generation failed.
    #[error("ID generation error: {0}")]
    IdGeneration(#[from] ferroflake::Error),

    /// The blocking generator task did not complete.
    #[error("worker error: {0}")]
    Worker(#[from] JoinError),

    /// The client request was invalid.
    #[error("invalid id: {id}")]
    InvalidId { id: u64 },
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::IdGeneration(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
