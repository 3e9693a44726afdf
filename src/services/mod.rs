// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - token lifecycle, Firestore queries, export run.

pub mod export;
pub mod firestore;
pub mod project;
pub mod token;

pub use export::{CollectionExport, CollectionOutcome, ExportSummary, Exporter};
pub use firestore::FirestoreClient;
pub use project::{decode_claims, resolve_project_id};
pub use token::{TokenRefresher, ValidToken};
