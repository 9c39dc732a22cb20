//! Bearer token file storage.
//!
//! Keeps the token as a single line in `~/.config/habit-tracker/token`.
//!
//! # Security Note
//!
//! The file is plaintext. On Unix it is written with mode 600.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use habit_core::Result;
use habit_core::token::TokenStore;

use crate::paths::HabitPaths;

/// File-backed [`TokenStore`].
///
/// Every call goes to the file, so a token written by another process (or
/// by sign-in earlier in this one) is seen by the next request.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location.
    pub fn new() -> Result<Self> {
        let path = HabitPaths::default().token_file()?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path (for testing or configuration).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // New files are created 600; an existing file is tightened before
        // the token is written.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;

        tracing::debug!("Stored bearer token at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed bearer token at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("token"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("nested").join("token"));

        store.save("jwt-abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("jwt-abc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_whitespace_only_file_means_no_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::with_path(path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("token"));
        store.save("secret").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_readable_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token");
        fs::write(&path, "old-token-that-is-longer").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::with_path(&path);
        store.save("new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().as_deref(), Some("new"));
    }
}
