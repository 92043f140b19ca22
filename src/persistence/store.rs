//! Single-slot save storage.

use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::core::config::SAVE_SLOT_NAME;
use crate::core::SaveFormat;
use crate::error::PersistenceError;

/// Somewhere an encoded snapshot can be kept between sessions.
pub trait SaveStore: Debug {
    /// Replace the stored bytes.
    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError>;

    /// Read the stored bytes. `PersistenceError::NoSave` when empty.
    fn read(&self) -> Result<Vec<u8>, PersistenceError>;

    /// Drop the stored bytes. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// A save file on disk, written atomically through a temp file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at an explicit file path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The autosave slot inside `dir`, named after the format.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>, format: SaveFormat) -> Self {
        Self::at(dir.as_ref().join(format!("{SAVE_SLOT_NAME}.{}", format.extension())))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SaveStore for FileStore {
    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        info!(path = %self.path.display(), bytes = bytes.len(), "game saved");
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>, PersistenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(PersistenceError::NoSave),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_save(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SaveStore for MemoryStore {
    fn write(&self, bytes: &[u8]) -> Result<(), PersistenceError> {
        *self.lock() = Some(bytes.to_vec());
        Ok(())
    }

    fn read(&self) -> Result<Vec<u8>, PersistenceError> {
        self.lock().clone().ok_or(PersistenceError::NoSave)
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.lock() = None;
        Ok(())
    }
}
