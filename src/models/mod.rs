// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the export.

pub mod claims;
pub mod credential;
pub mod query;

pub use claims::IdentityClaims;
pub use credential::{CredentialRecord, StsTokenManager};
pub use query::{RunQueryRequest, StructuredQuery};
