// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Firestore-Export: download one user's documents from Firestore
//!
//! This crate loads a cached Firebase credential, refreshes it when it has
//! expired, and snapshots the user's documents from a fixed set of
//! collections into local JSON files.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::Config;
pub use error::{ExportError, Result};
pub use services::{ExportSummary, Exporter};
