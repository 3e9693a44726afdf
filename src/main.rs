// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-Export CLI
//!
//! Snapshots the current user's Firestore documents into `outs/`.

use firestore_export::{config::LogFormat, time_utils::now_millis, Config, Exporter};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load configuration from environment
    let config = Config::from_env();
    init_logging(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or_default(),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        credential = %config.credential_path.display(),
        output_dir = %config.output_dir.display(),
        collections = config.collections.len(),
        "Starting Firestore export"
    );

    let exporter = match Exporter::new(config) {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize exporter");
            return ExitCode::FAILURE;
        }
    };

    match exporter.run(now_millis()).await {
        Ok(summary) => {
            tracing::info!(
                project_id = %summary.project_id,
                refreshed = summary.refreshed,
                files = summary.files_written(),
                documents = summary.documents_written(),
                "Export complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Export halted");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging, JSON or compact text.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("firestore_export=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }
}
