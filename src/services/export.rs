// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export run.
//!
//! Handles the whole workflow:
//! 1. Load the cached credential
//! 2. Refresh the access token if it has expired
//! 3. Resolve the project id from the token claims
//! 4. Query each configured collection and write its snapshot
//!
//! Steps 1-3 halt the run on failure. A failed query only skips its
//! collection.

use crate::config::Config;
use crate::db::{CredentialStore, SnapshotWriter, WriteOutcome};
use crate::error::Result;
use crate::services::project::resolve_project_id;
use crate::services::{FirestoreClient, TokenRefresher};
use anyhow::Context;
use std::path::PathBuf;

/// What happened to one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    Written { path: PathBuf, documents: usize },
    /// The query succeeded but matched no documents.
    Empty,
    /// The query failed (denied, missing, or unreachable).
    Inaccessible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionExport {
    pub collection_id: String,
    pub outcome: CollectionOutcome,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub project_id: String,
    /// Whether the credential had to be refreshed.
    pub refreshed: bool,
    pub collections: Vec<CollectionExport>,
}

impl ExportSummary {
    pub fn files_written(&self) -> usize {
        self.collections
            .iter()
            .filter(|c| matches!(c.outcome, CollectionOutcome::Written { .. }))
            .count()
    }

    pub fn documents_written(&self) -> usize {
        self.collections
            .iter()
            .map(|c| match c.outcome {
                CollectionOutcome::Written { documents, .. } => documents,
                _ => 0,
            })
            .sum()
    }

    pub fn outcome(&self, collection_id: &str) -> Option<&CollectionOutcome> {
        self.collections
            .iter()
            .find(|c| c.collection_id == collection_id)
            .map(|c| &c.outcome)
    }
}

/// Runs one export from a configuration.
pub struct Exporter {
    store: CredentialStore,
    refresher: TokenRefresher,
    firestore: FirestoreClient,
    writer: SnapshotWriter,
    collections: Vec<String>,
    user_id_field: String,
}

impl Exporter {
    /// Create an exporter with its own HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("firestore-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed building HTTP client")?;

        Ok(Self::with_client(config, http))
    }

    /// Create an exporter sharing an existing HTTP client.
    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        let store = CredentialStore::new(config.credential_path);

        Self {
            refresher: TokenRefresher::new(http.clone(), config.identity_base_url, store.clone()),
            firestore: FirestoreClient::new(http, config.firestore_base_url),
            writer: SnapshotWriter::new(config.output_dir),
            store,
            collections: config.collections,
            user_id_field: config.user_id_field,
        }
    }

    /// Run the export as of `now_ms` (Unix epoch millis).
    pub async fn run(&self, now_ms: i64) -> Result<ExportSummary> {
        let record = self.store.load()?;
        let token = self.refresher.ensure_valid(&record, now_ms).await?;

        let project_id = resolve_project_id(&token.access_token)?;
        tracing::info!(project_id = %project_id, "Using project");

        let mut collections = Vec::with_capacity(self.collections.len());

        for collection_id in &self.collections {
            tracing::info!(collection = %collection_id, "Querying collection");

            let results = self
                .firestore
                .run_user_query(
                    &project_id,
                    &token.access_token,
                    collection_id,
                    &self.user_id_field,
                    &record.uid,
                )
                .await?;

            let outcome = match self.writer.write(collection_id, results.as_deref())? {
                WriteOutcome::Written { path, documents } => {
                    tracing::info!(
                        collection = %collection_id,
                        documents,
                        path = %path.display(),
                        "Saved collection"
                    );
                    CollectionOutcome::Written { path, documents }
                }
                WriteOutcome::Skipped if results.is_some() => {
                    tracing::info!(collection = %collection_id, "No documents found");
                    CollectionOutcome::Empty
                }
                WriteOutcome::Skipped => {
                    tracing::warn!(collection = %collection_id, "Collection not accessible, skipped");
                    CollectionOutcome::Inaccessible
                }
            };

            collections.push(CollectionExport {
                collection_id: collection_id.clone(),
                outcome,
            });
        }

        Ok(ExportSummary {
            project_id,
            refreshed: token.refreshed.is_some(),
            collections,
        })
    }
}
