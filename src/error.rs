// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export error types.
//!
//! Every failure of a run maps to one `ExportError` variant. Most variants
//! halt the run; a failed per-collection query only skips that collection.

use std::path::PathBuf;

/// Error type shared by every stage of an export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(
        "No credential found at {}. Export the Firebase authUser object from the browser and save it there",
        path.display()
    )]
    MissingCredential { path: PathBuf },

    #[error("Invalid credential file: {0}")]
    InvalidCredential(String),

    #[error("Token refresh failed with status {status}: {body}")]
    RefreshFailed { status: u16, body: String },

    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    #[error("Query failed with status {status} at {path}")]
    QueryFailed {
        status: u16,
        path: String,
        body: String,
    },

    #[error("Query request to {path} failed: {source}")]
    QueryUnreachable {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ExportError {
    /// Whether this error halts the whole run.
    ///
    /// Only per-collection query failures are recoverable; the query client
    /// logs them and the exporter moves on to the next collection.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExportError::QueryFailed { .. } | ExportError::QueryUnreachable { .. }
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ExportError::RefreshFailed { status, .. } | ExportError::QueryFailed { status, .. } => {
                Some(*status)
            }
            ExportError::Http(e) | ExportError::QueryUnreachable { source: e, .. } => {
                e.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
