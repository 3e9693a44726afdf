// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Project id resolution from the access token's claims.

use crate::error::{ExportError, Result};
use crate::models::IdentityClaims;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

/// Decode the (unverified) claims of a JWT access token.
pub fn decode_claims(access_token: &str) -> Result<IdentityClaims> {
    let segments: Vec<&str> = access_token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(ExportError::MalformedToken(format!(
            "expected 3 dot-separated segments, found {}",
            segments.len()
        )));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| ExportError::MalformedToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&payload)
        .map_err(|e| ExportError::MalformedToken(format!("invalid claims: {}", e)))
}

/// Cloud project id: the last path segment of the token issuer.
pub fn resolve_project_id(access_token: &str) -> Result<String> {
    let claims = decode_claims(access_token)?;

    claims
        .issuer_project()
        .map(str::to_string)
        .ok_or_else(|| {
            ExportError::MalformedToken(format!("issuer '{}' has no project segment", claims.iss))
        })
}
