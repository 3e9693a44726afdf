// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Claims carried in a Firebase ID token payload.

use serde::Deserialize;

/// Identity claims decoded from the access token.
///
/// The signature is not verified; the claims are only used to locate the
/// project the token was issued for.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    /// Issuer, e.g. `https://securetoken.google.com/<project>`
    pub iss: String,
}

impl IdentityClaims {
    /// Last path segment of the issuer URL, if non-empty.
    pub fn issuer_project(&self) -> Option<&str> {
        self.iss
            .rsplit('/')
            .next()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
    }
}
