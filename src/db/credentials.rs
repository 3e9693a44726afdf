// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed credential store.
//!
//! The credential file is the only copy of the token state. Saves replace
//! the whole file through a rename so readers never see a partial write.

use crate::error::{ExportError, Result};
use crate::models::CredentialRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reads and replaces the local credential record.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the credential record.
    ///
    /// A missing file is reported as `MissingCredential`; the record has to
    /// be supplied by the operator.
    pub fn load(&self) -> Result<CredentialRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::MissingCredential {
                    path: self.path.clone(),
                })
            }
            Err(err) => {
                return Err(ExportError::InvalidCredential(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };

        let record: CredentialRecord = serde_json::from_str(&raw).map_err(|e| {
            ExportError::InvalidCredential(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::info!(path = %self.path.display(), "Loaded credential");
        Ok(record)
    }

    /// Replace the credential record on disk.
    pub fn save(&self, record: &CredentialRecord) -> Result<()> {
        let serialized = serde_json::to_string_pretty(record)?;
        let tmp_path = self.tmp_path();

        let replaced = write_private(&tmp_path, serialized.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }

    /// Sibling temp file, so the rename stays on one filesystem.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "credential".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Write `contents` to a file readable only by its owner.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies on creation; a leftover temp file keeps its bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}
