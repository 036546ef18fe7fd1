//! Persistence of the access/refresh token pair.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::models::AuthTokens;

/// File name of the token entry inside the data directory.
pub const TOKENS_FILENAME: &str = "tokens.json";

/// A single persisted entry holding the token pair.
pub trait TokenStore {
    /// Loads the stored pair.
    ///
    /// Returns `Ok(None)` if nothing is stored and `Err` if the entry
    /// exists but cannot be read.
    fn load(&self) -> Result<Option<AuthTokens>, StorageError>;

    fn save(&self, tokens: &AuthTokens) -> Result<(), StorageError>;

    /// Removes the entry. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Token store backed by `<data_dir>/tokens.json`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    data_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(TOKENS_FILENAME)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, StorageError> {
        let path = self.path();

        match fs::read(&path) {
            Ok(bytes) => {
                let tokens = serde_json::from_slice(&bytes)
                    .map_err(|e| StorageError::Corrupt(path, e.to_string()))?;
                Ok(Some(tokens))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;

        let path = self.path();
        let json = serde_json::to_vec_pretty(tokens)
            .map_err(|e| StorageError::Corrupt(path.clone(), e.to_string()))?;
        write_private(&path, &json).map_err(|e| StorageError::Io(path, e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<AuthTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AuthTokens>, StorageError> {
        Ok(self.tokens.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, tokens: &AuthTokens) -> Result<(), StorageError> {
        *self.tokens.lock().unwrap_or_else(|e| e.into_inner()) = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.tokens.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Errors that can occur while persisting tokens.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Stored tokens at {} are unreadable: {}", .0.display(), .1)]
    Corrupt(PathBuf, String),
}
