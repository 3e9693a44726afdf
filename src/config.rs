// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export configuration loaded from environment variables.
//!
//! File locations, endpoints and log format come from the environment (or a
//! `.env` file). The target collections and the ownership field are fixed
//! defaults that live here so tests can substitute them.

use crate::db::collections;
use std::env;
use std::path::PathBuf;

/// Firestore field holding the owning user's Firebase uid.
pub const USER_ID_FIELD: &str = "firebaseUserId";

pub const DEFAULT_CREDENTIAL_PATH: &str = "token.json";
pub const DEFAULT_OUTPUT_DIR: &str = "outs";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Text,
    /// Flattened JSON events.
    Json,
}

/// Export configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the cached Firebase credential (authUser JSON)
    pub credential_path: PathBuf,
    /// Directory receiving one `<collection>.json` file per collection
    pub output_dir: PathBuf,
    /// Base URL of the Secure Token service
    pub identity_base_url: String,
    /// Base URL of the Firestore REST API
    pub firestore_base_url: String,
    /// Collections to export, in order
    pub collections: Vec<String>,
    /// Field compared against the user's uid
    pub user_id_field: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential_path: PathBuf::from(DEFAULT_CREDENTIAL_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            firestore_base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            collections: collections::ALL.iter().map(|c| c.to_string()).collect(),
            user_id_field: USER_ID_FIELD.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults; set-but-empty ones are
    /// rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let log_format = match optional_var("EXPORT_LOG_FORMAT")?.as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "EXPORT_LOG_FORMAT",
                    reason: format!("expected 'text' or 'json', got '{}'", other),
                })
            }
        };

        Ok(Self {
            credential_path: optional_var("EXPORT_CREDENTIAL_PATH")?
                .map(PathBuf::from)
                .unwrap_or(defaults.credential_path),
            output_dir: optional_var("EXPORT_OUTPUT_DIR")?
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            identity_base_url: optional_var("EXPORT_IDENTITY_BASE_URL")?
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.identity_base_url),
            firestore_base_url: optional_var("EXPORT_FIRESTORE_BASE_URL")?
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.firestore_base_url),
            log_format,
            ..defaults
        })
    }
}

/// Read an optional variable, rejecting blank values.
fn optional_var(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Invalid {
            name,
            reason: "must not be empty".to_string(),
        }),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::Invalid {
            name,
            reason: "not valid unicode".to_string(),
        }),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
