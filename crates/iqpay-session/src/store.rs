#![forbid(unsafe_code)]

//! Session flag storage backends.
//!
//! [`SessionBackend`] is the pluggable seam: [`MemorySessionStore`] for
//! tests and non-remembering sessions, [`FileSessionStore`] for real
//! persistence. [`SessionStore`] layers the expiry policy on top of
//! whichever backend is injected.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::flag::{SESSION_KEY, SessionFlag};

/// Errors that can occur during session storage operations.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Backend cannot service requests (e.g. poisoned lock).
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(_) | StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Where the session flag lives.
///
/// Implementations must be safe to share across threads. `save` should be
/// atomic: a crash mid-save leaves either the old flag or the new one,
/// never a torn file.
pub trait SessionBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Read the stored flag. `Ok(None)` when nothing is stored or the
    /// stored data is unreadable (unreadable data is logged and treated
    /// as absent).
    fn load(&self) -> StoreResult<Option<SessionFlag>>;

    /// Persist the flag, replacing any previous one.
    fn save(&self, flag: &SessionFlag) -> StoreResult<()>;

    /// Remove the stored flag. Idempotent.
    fn clear(&self) -> StoreResult<()>;
}

/// In-memory backend. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    flag: RwLock<Option<SessionFlag>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemorySessionStore {
    fn name(&self) -> &str {
        "MemorySessionStore"
    }

    fn load(&self) -> StoreResult<Option<SessionFlag>> {
        let guard = self
            .flag
            .read()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".into()))?;
        Ok(*guard)
    }

    fn save(&self, flag: &SessionFlag) -> StoreResult<()> {
        let mut guard = self
            .flag
            .write()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".into()))?;
        *guard = Some(*flag);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut guard = self
            .flag
            .write()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// On-disk file layout: one JSON object keyed by [`SESSION_KEY`].
///
/// A map rather than a bare flag so the file stays forward-compatible
/// with additional keys without a format break.
type SessionFile = BTreeMap<String, SessionFlag>;

/// JSON-file backend with atomic write-then-rename saves.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

impl SessionBackend for FileSessionStore {
    fn name(&self) -> &str {
        "FileSessionStore"
    }

    fn load(&self) -> StoreResult<Option<SessionFlag>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, SessionFile>(reader) {
            Ok(entries) => Ok(entries.get(SESSION_KEY).copied()),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file unreadable, treating as absent"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, flag: &SessionFlag) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut entries = SessionFile::new();
        entries.insert(SESSION_KEY.to_owned(), *flag);

        // Write to temp file first (atomic pattern)
        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &entries).map_err(|e| {
                StoreError::Serialization(format!("failed to serialize session flag: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "saved session flag");
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Expiry policy over an injected backend.
///
/// Shared by cloning: clones see the same backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Store over a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Store over a JSON file at `path`.
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSessionStore::new(path)))
    }

    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether a live session exists at `now`.
    ///
    /// An expired flag is deleted as a side effect. Storage errors degrade
    /// to `false`; the caller re-authenticates and the store logs why.
    pub fn check(&self, now: SystemTime) -> bool {
        let flag = match self.backend.load() {
            Ok(flag) => flag,
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "session load failed");
                return false;
            }
        };
        match flag {
            Some(flag) if flag.is_live(now) => true,
            Some(_) => {
                tracing::debug!(backend = self.backend.name(), "session expired, clearing");
                if let Err(e) = self.backend.clear() {
                    tracing::warn!(backend = self.backend.name(), error = %e, "failed to clear expired session");
                }
                false
            }
            None => false,
        }
    }

    /// Persist a session expiring 30 days after `now`.
    pub fn remember(&self, now: SystemTime) -> StoreResult<()> {
        self.backend.save(&SessionFlag::starting_at(now))
    }

    /// Drop any stored session.
    pub fn clear(&self) -> StoreResult<()> {
        self.backend.clear()
    }
}
