// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore REST client for structured queries.
//!
//! Results are returned as raw JSON envelopes; the export never interprets
//! document fields.

use crate::error::{ExportError, Result};
use crate::models::{RunQueryRequest, StructuredQuery};
use serde_json::Value;

/// Firestore REST API client.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl FirestoreClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `documents:runQuery` endpoint of the project's default database.
    pub fn run_query_url(&self, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents:runQuery",
            self.base_url, project_id
        )
    }

    /// Run a structured query, returning every result envelope.
    ///
    /// A non-success status is `QueryFailed` and a transport or decoding
    /// failure is `QueryUnreachable`; both report the path with the query
    /// string stripped.
    pub async fn run_query(
        &self,
        project_id: &str,
        access_token: &str,
        query: StructuredQuery,
    ) -> Result<Vec<Value>> {
        let url = self.run_query_url(project_id);
        let unreachable = |source| ExportError::QueryUnreachable {
            path: strip_query(&url).to_string(),
            source,
        };
        let request = RunQueryRequest {
            structured_query: query,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::QueryFailed {
                status: status.as_u16(),
                path: strip_query(&url).to_string(),
                body,
            });
        }

        response.json().await.map_err(unreachable)
    }

    /// Query `collection_id` for the documents owned by `user_id`.
    ///
    /// Recoverable failures are logged and reported as `Ok(None)` so the
    /// caller can move on to the next collection; anything fatal is returned.
    pub async fn run_user_query(
        &self,
        project_id: &str,
        access_token: &str,
        collection_id: &str,
        user_field: &str,
        user_id: &str,
    ) -> Result<Option<Vec<Value>>> {
        let query = StructuredQuery::owned_by(collection_id, user_field, user_id);

        match self.run_query(project_id, access_token, query).await {
            Ok(results) => Ok(Some(results)),
            Err(e) if !e.is_fatal() => {
                tracing::warn!(
                    status = e.http_status(),
                    collection = collection_id,
                    error = %e,
                    "Query failed"
                );
                if let ExportError::QueryFailed { body, .. } = &e {
                    tracing::info!(body = %body, "Query error response");
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Drop everything from the first `?`.
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
