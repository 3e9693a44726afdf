// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-collection JSON snapshot files.

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Result of a snapshot write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, documents: usize },
    /// Nothing to write; no file was created or touched.
    Skipped,
}

/// Writes query results to `<output_dir>/<collection>.json`.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, collection_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", collection_id))
    }

    /// Write `results` verbatim if any envelope carries a document.
    ///
    /// `None` (query failed) and result sets without documents are skipped.
    pub fn write(&self, collection_id: &str, results: Option<&[Value]>) -> Result<WriteOutcome> {
        let results = results.unwrap_or_default();
        let documents = results.iter().filter(|entry| has_document(entry)).count();

        if documents == 0 {
            return Ok(WriteOutcome::Skipped);
        }

        fs::create_dir_all(&self.output_dir)?;

        let path = self.path_for(collection_id);
        fs::write(&path, serde_json::to_string_pretty(results)?)?;

        tracing::debug!(
            collection = collection_id,
            path = %path.display(),
            documents,
            "Snapshot written"
        );

        Ok(WriteOutcome::Written { path, documents })
    }
}

/// Whether a runQuery envelope carries a document.
///
/// An empty result set comes back as a single `{"readTime": ...}` envelope.
pub fn has_document(entry: &Value) -> bool {
    entry.get("document").is_some_and(|doc| !doc.is_null())
}
