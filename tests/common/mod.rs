// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use firestore_export::Config;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const USER_ID: &str = "user-123";
pub const API_KEY: &str = "test-api-key";
pub const PROJECT_ID: &str = "my-proj";

/// Build an unsigned JWT whose issuer ends in `project_id`.
#[allow(dead_code)]
pub fn fake_token(project_id: &str, nonce: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "iss": format!("https://securetoken.google.com/{}", project_id),
            "aud": project_id,
            "user_id": USER_ID,
            "nonce": nonce,
        })
        .to_string(),
    );
    format!("{}.{}.signature", header, payload)
}

/// Credential blob shaped like the browser's Firebase authUser object.
#[allow(dead_code)]
pub fn credential_json(access_token: &str, refresh_token: &str, expiration_time: i64) -> Value {
    json!({
        "uid": USER_ID,
        "email": "user@example.com",
        "emailVerified": true,
        "apiKey": API_KEY,
        "appName": "[DEFAULT]",
        "stsTokenManager": {
            "refreshToken": refresh_token,
            "accessToken": access_token,
            "expirationTime": expiration_time
        },
        "createdAt": "1700000000000"
    })
}

/// Write a credential file (compact JSON) and return its path.
#[allow(dead_code)]
pub fn write_credential(dir: &Path, credential: &Value) -> PathBuf {
    let path = dir.join("token.json");
    fs::write(&path, credential.to_string()).expect("write credential");
    path
}

#[allow(dead_code)]
pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read file")).expect("parse json")
}

/// Config pointing both endpoints at a mock server.
#[allow(dead_code)]
pub fn test_config(dir: &Path, server_uri: &str, collections: &[&str]) -> Config {
    Config {
        credential_path: dir.join("token.json"),
        output_dir: dir.join("outs"),
        identity_base_url: server_uri.to_string(),
        firestore_base_url: server_uri.to_string(),
        collections: collections.iter().map(|c| c.to_string()).collect(),
        ..Config::default()
    }
}

/// runQuery result envelope for a single document.
#[allow(dead_code)]
pub fn envelope(collection: &str, doc_id: &str) -> Value {
    json!({
        "document": {
            "name": format!(
                "projects/{}/databases/(default)/documents/{}/{}",
                PROJECT_ID, collection, doc_id
            ),
            "fields": {
                "firebaseUserId": { "stringValue": USER_ID },
                "title": { "stringValue": format!("{} {}", collection, doc_id) }
            },
            "createTime": "2025-03-01T10:00:00.000000Z",
            "updateTime": "2025-03-02T10:00:00.000000Z"
        },
        "readTime": "2025-06-01T00:00:00.000000Z"
    })
}

#[allow(dead_code)]
pub fn run_query_path(project_id: &str) -> String {
    format!(
        "/v1/projects/{}/databases/(default)/documents:runQuery",
        project_id
    )
}
