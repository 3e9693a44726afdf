// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle.
//!
//! Handles:
//! - Expiry check against the cached credential
//! - Refresh-token exchange with the Secure Token service
//! - Persisting the refreshed credential before it is used

use crate::db::CredentialStore;
use crate::error::{ExportError, Result};
use crate::models::CredentialRecord;
use crate::time_utils::format_millis;
use serde::{Deserialize, Deserializer, Serialize};

/// Access token that is valid at the time of the check.
#[derive(Debug, Clone)]
pub struct ValidToken {
    pub access_token: String,
    /// The rewritten credential, when a refresh took place.
    pub refreshed: Option<CredentialRecord>,
}

/// Refresh-token request body.
#[derive(Debug, Serialize)]
struct TokenRefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

/// Token refresh response from the Secure Token service.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    /// Lifetime in seconds (sent as a decimal string)
    #[serde(deserialize_with = "deserialize_seconds")]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Checks token expiry and refreshes the credential when needed.
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    http: reqwest::Client,
    base_url: String,
    store: CredentialStore,
}

impl TokenRefresher {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, store: CredentialStore) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            store,
        }
    }

    /// Return an access token valid at `now_ms`.
    ///
    /// An unexpired token is returned as-is without any I/O. An expired one
    /// is exchanged for a new token, and the updated record is saved before
    /// returning. A rejected exchange is `RefreshFailed`.
    pub async fn ensure_valid(&self, record: &CredentialRecord, now_ms: i64) -> Result<ValidToken> {
        tracing::debug!(
            expires = %format_millis(record.expiration_time()),
            now = %format_millis(now_ms),
            "Checking token expiry"
        );

        if !record.is_expired(now_ms) {
            return Ok(ValidToken {
                access_token: record.access_token().to_string(),
                refreshed: None,
            });
        }

        tracing::info!(
            expired_at = %format_millis(record.expiration_time()),
            "Access token expired, refreshing"
        );

        let response = self
            .refresh_token(&record.api_key, record.refresh_token())
            .await?;

        let updated = apply_refresh(record, &response, now_ms);
        self.store.save(&updated)?;

        tracing::info!(
            path = %self.store.path().display(),
            expires = %format_millis(updated.expiration_time()),
            rotated = response.refresh_token.as_deref().is_some_and(|t| !t.is_empty()),
            "Token refreshed and saved"
        );

        Ok(ValidToken {
            access_token: updated.access_token().to_string(),
            refreshed: Some(updated),
        })
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh_token(
        &self,
        api_key: &str,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse> {
        let url = format!("{}/v1/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&TokenRefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ExportError::RefreshFailed {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ExportError::RefreshFailed {
            status: status.as_u16(),
            body: format!("unparsable refresh response ({}): {}", e, body),
        })
    }
}

/// Build the credential record that results from a successful refresh.
///
/// The old refresh token is kept when the provider does not rotate it.
pub fn apply_refresh(
    record: &CredentialRecord,
    response: &TokenRefreshResponse,
    now_ms: i64,
) -> CredentialRecord {
    let mut updated = record.clone();
    let tokens = &mut updated.sts_token_manager;

    tokens.access_token = response.access_token.clone();
    tokens.expiration_time = now_ms.saturating_add(response.expires_in.saturating_mul(1000));
    if let Some(rotated) = response.refresh_token.as_deref().filter(|t| !t.is_empty()) {
        tokens.refresh_token = rotated.to_string();
    }

    updated
}

fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(i64),
        Text(String),
    }

    match Seconds::deserialize(deserializer)? {
        Seconds::Number(n) => Ok(n),
        Seconds::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
