// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached Firebase credential (the browser's `authUser` object).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credential record persisted in the local credential file.
///
/// Only the fields the export needs are typed. Everything else in the file
/// (email, display name, provider data, ...) is kept in `extra` so a rewrite
/// after a refresh does not drop it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Firebase user id, matched against the ownership field
    pub uid: String,
    /// Web API key used for the refresh exchange
    pub api_key: String,
    pub sts_token_manager: StsTokenManager,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token bundle nested under `stsTokenManager`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StsTokenManager {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry (Unix epoch millis)
    pub expiration_time: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CredentialRecord {
    pub fn access_token(&self) -> &str {
        &self.sts_token_manager.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.sts_token_manager.refresh_token
    }

    pub fn expiration_time(&self) -> i64 {
        self.sts_token_manager.expiration_time
    }

    /// True once `now_ms` is strictly past the expiry.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.sts_token_manager.expiration_time
    }
}
