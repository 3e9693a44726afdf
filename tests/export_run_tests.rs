// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end export runs against a mocked Secure Token + Firestore server.

use firestore_export::services::CollectionOutcome;
use firestore_export::{ExportError, Exporter};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{
    credential_json, envelope, fake_token, read_json, run_query_path, test_config,
    write_credential, PROJECT_ID,
};

const NOW: i64 = 1_750_000_000_000;

async fn mount_collection(server: &MockServer, collection: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(run_query_path(PROJECT_ID)))
        .and(body_partial_json(json!({
            "structuredQuery": { "from": [{ "collectionId": collection }] }
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_denied_collection_is_skipped_and_other_written() {
    let server = MockServer::start().await;
    mount_collection(&server, "transcripts", ResponseTemplate::new(403)).await;
    mount_collection(
        &server,
        "meetings",
        ResponseTemplate::new(200)
            .set_body_json(json!([envelope("meetings", "a"), envelope("meetings", "b")])),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let access = fake_token(PROJECT_ID, "1");
    write_credential(dir.path(), &credential_json(&access, "refresh", NOW + 60_000));

    let config = test_config(dir.path(), &server.uri(), &["transcripts", "meetings"]);
    let summary = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .expect("run should complete");

    assert_eq!(summary.project_id, PROJECT_ID);
    assert!(!summary.refreshed);
    assert_eq!(summary.files_written(), 1);
    assert_eq!(summary.documents_written(), 2);
    assert_eq!(
        summary.outcome("transcripts"),
        Some(&CollectionOutcome::Inaccessible)
    );

    let outs: Vec<_> = fs::read_dir(dir.path().join("outs"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(outs, vec!["meetings.json"]);

    let written: Vec<Value> =
        serde_json::from_value(read_json(&dir.path().join("outs/meetings.json"))).unwrap();
    assert_eq!(written, vec![envelope("meetings", "a"), envelope("meetings", "b")]);
}

#[tokio::test]
async fn test_empty_collection_is_distinguished_from_denied() {
    let server = MockServer::start().await;
    mount_collection(
        &server,
        "persons",
        ResponseTemplate::new(200).set_body_json(json!([{ "readTime": "2025-06-01T00:00:00Z" }])),
    )
    .await;
    mount_collection(&server, "meetings", ResponseTemplate::new(403)).await;

    let dir = TempDir::new().unwrap();
    let access = fake_token(PROJECT_ID, "1");
    write_credential(dir.path(), &credential_json(&access, "refresh", NOW));

    let config = test_config(dir.path(), &server.uri(), &["persons", "meetings"]);
    let summary = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .unwrap();

    assert_eq!(summary.outcome("persons"), Some(&CollectionOutcome::Empty));
    assert_eq!(
        summary.outcome("meetings"),
        Some(&CollectionOutcome::Inaccessible)
    );
    assert_eq!(summary.files_written(), 0);
    assert!(!dir.path().join("outs/persons.json").exists());
    assert!(!dir.path().join("outs/meetings.json").exists());
}

#[tokio::test]
async fn test_expired_credential_refreshes_before_querying() {
    let server = MockServer::start().await;
    let fresh = fake_token(PROJECT_ID, "fresh");

    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": fresh,
            "expires_in": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(run_query_path(PROJECT_ID)))
        .and(header("authorization", format!("Bearer {}", fresh).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([envelope("meetings", "x")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let stale = fake_token(PROJECT_ID, "stale");
    let credential_path =
        write_credential(dir.path(), &credential_json(&stale, "refresh", NOW - 1));

    let config = test_config(dir.path(), &server.uri(), &["meetings"]);
    let summary = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .unwrap();

    assert!(summary.refreshed);
    assert_eq!(summary.files_written(), 1);

    let saved = read_json(&credential_path);
    assert_eq!(saved["stsTokenManager"]["accessToken"], fresh.as_str());
    assert_eq!(saved["stsTokenManager"]["expirationTime"], NOW + 3_600_000);
}

#[tokio::test]
async fn test_missing_credential_halts_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let config = test_config(dir.path(), &server.uri(), &["meetings"]);
    let err = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::MissingCredential { .. }));
    assert!(err.is_fatal());
    assert!(!dir.path().join("outs").exists());
}

#[tokio::test]
async fn test_failed_refresh_halts_before_queries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("INVALID_REFRESH_TOKEN"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(run_query_path(PROJECT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let stale = fake_token(PROJECT_ID, "stale");
    write_credential(dir.path(), &credential_json(&stale, "refresh", NOW - 1));

    let config = test_config(dir.path(), &server.uri(), &["meetings"]);
    let err = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::RefreshFailed { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_token_halts_before_queries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(run_query_path(PROJECT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_credential(dir.path(), &credential_json("not-a-jwt", "refresh", NOW));

    let config = test_config(dir.path(), &server.uri(), &["meetings"]);
    let err = Exporter::with_client(config, reqwest::Client::new())
        .run(NOW)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::MalformedToken(_)));
}
