//! The on-disk token record.
//!
//! The record is JSON at `<data dir>/auth.json`. Writes go to a sibling
//! `auth.tmp` that is created owner-only and then renamed over the record,
//! so a reader never sees a half-written token and the token is never
//! readable by other users, even when an older record had looser bits.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::errors::AuthError;
use crate::types::{AUTH_STORAGE_VERSION, AuthStorage};

const AUTH_FILE_NAME: &str = "auth.json";

/// Owner read/write.
#[cfg(unix)]
const PRIVATE_MODE: u32 = 0o600;

/// `<data_dir>/auth.json`.
pub fn auth_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(AUTH_FILE_NAME)
}

/// Read the token record.
///
/// A missing, unreadable or unparsable file, or one written by a different
/// format version, reads as "no record". Anything other than a missing file
/// is logged.
pub fn load_auth_storage(path: &Path) -> Option<AuthStorage> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read token record");
            return None;
        }
    };

    let storage = serde_json::from_str::<AuthStorage>(&raw)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "token record is not valid JSON");
        })
        .ok()?;
    if storage.version != AUTH_STORAGE_VERSION {
        tracing::warn!(
            path = %path.display(),
            version = storage.version,
            "ignoring token record with unknown version"
        );
        return None;
    }
    Some(storage)
}

/// Stamp `last_updated` and replace the record at `path`.
///
/// Parent directories are created as needed.
pub fn save_auth_storage(path: &Path, storage: &mut AuthStorage) -> Result<(), AuthError> {
    storage.last_updated = chrono::Utc::now().to_rfc3339();
    let json = serde_json::to_vec_pretty(storage)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let staging = path.with_extension("tmp");
    if let Err(e) = write_private(&staging, &json).and_then(|()| std::fs::rename(&staging, path)) {
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), "token record saved");
    Ok(())
}

/// Write `bytes` to `path`, owner-only on unix.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    let _ = options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let _ = options.mode(PRIVATE_MODE);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation; a leftover staging file keeps its bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(PRIVATE_MODE))?;
    }
    file.write_all(bytes)?;
    file.sync_all()
}

/// Remove the record. A missing file is fine.
pub fn clear_auth_storage(path: &Path) -> Result<(), AuthError> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
