// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer token persistence.
//!
//! The token is the only state that survives a restart. Only
//! [`AuthSession`](crate::AuthSession) writes it; everything else reads it
//! through the session.

use std::fmt::Debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{AuthError, AuthResult};

/// Key the token is stored under.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

// =============================================================================
// TokenStore
// =============================================================================

/// Storage for the persisted bearer token.
pub trait TokenStore: Send + Sync + Debug {
    /// Reads the stored token, if any.
    fn load(&self) -> AuthResult<Option<String>>;

    /// Stores the token, replacing any previous one.
    fn save(&self, token: &str) -> AuthResult<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> AuthResult<()>;
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// In-process token store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> AuthResult<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> AuthResult<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        self.token.lock().take();
        Ok(())
    }
}

// =============================================================================
// FileTokenStore
// =============================================================================

/// Token store backed by a single file named after the key.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store under `dir` using [`DEFAULT_TOKEN_KEY`].
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, DEFAULT_TOKEN_KEY)
    }

    /// Creates a store under `dir` using a custom key.
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(key),
        }
    }

    /// Returns the token file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> AuthResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, token: &str) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::storage(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        write_private(&self.path, token).map_err(|e| {
            AuthError::storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), "Persisted token");
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::storage(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Writes the file readable by the owner only.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // The mode only applies on creation; tighten files left by older runs.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("state"));
        assert!(store.path().ends_with("auth_token"));
        assert_eq!(store.load().unwrap(), None);

        store.save("a.b.c").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("a.b.c"));

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_trims_and_ignores_blank() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::with_key(dir.path(), "token");

        fs::write(store.path(), "a.b.c\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("a.b.c"));

        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path());

        fs::write(store.path(), "old").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();
        store.save("a.b.c").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().as_deref(), Some("a.b.c"));
    }
}
