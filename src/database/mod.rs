/// Persistent Store
///
/// The whole data set lives in a single JSON snapshot on disk. Every call
/// loads the snapshot, works on it in memory and (for transactions) writes the
/// complete snapshot back. A single reader/writer lock serializes transactions
/// against each other and against queries.

mod messages;
mod models;
mod users;

pub use messages::{
    create_message, delete_message, get_message, list_messages, MessageFilter, SortDirection,
};
pub use models::{Message, MessageId, RefreshToken, Sequences, Snapshot, User, UserId};
pub use users::{authenticate_user, create_user, get_user, set_premium_flag, update_user};

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppError;

/// Handle to the backing snapshot file
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Database {
    /// Open the store at `path`, writing an empty snapshot if no file exists yet
    pub fn initialize(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let database = Self {
            path: path.into(),
            lock: RwLock::new(()),
        };

        if let Some(parent) = database.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !database.path.exists() {
            database.write_snapshot(&Snapshot::default())?;
            tracing::info!(path = %database.path.display(), "Created empty database");
        }

        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run an atomic read-modify-write against the snapshot
    ///
    /// `f` receives a freshly loaded copy. When it returns `Ok`, the copy is
    /// written back before the lock is released; when it returns `Err`, the
    /// copy is dropped and the file is left untouched.
    pub fn transact<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, AppError>,
    {
        let _guard = self.write_lock();

        let mut snapshot = self.load_snapshot()?;
        let result = f(&mut snapshot)?;
        self.write_snapshot(&snapshot)?;

        Ok(result)
    }

    /// Run a read-only function against the current snapshot
    pub fn query<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Snapshot) -> Result<T, AppError>,
    {
        let _guard = self.read_lock();

        let snapshot = self.load_snapshot()?;
        f(&snapshot)
    }

    /// Delete the backing file and start over with an empty snapshot
    pub fn reset(&self) -> Result<(), AppError> {
        let _guard = self.write_lock();

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.write_snapshot(&Snapshot::default())?;

        tracing::warn!(path = %self.path.display(), "Database reset");
        Ok(())
    }

    // The lock guards no data and the file is only replaced by rename, so a
    // poisoned lock is safe to take over.
    fn write_lock(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(|poisoned| {
            tracing::warn!(path = %self.path.display(), "Recovering database lock after a panicked transaction");
            self.lock.clear_poison();
            poisoned.into_inner()
        })
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(|poisoned| {
            tracing::warn!(path = %self.path.display(), "Recovering database lock after a panicked transaction");
            self.lock.clear_poison();
            poisoned.into_inner()
        })
    }

    fn load_snapshot(&self) -> Result<Snapshot, AppError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No database file, using empty snapshot");
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Snapshot::default());
        }

        let snapshot = serde_json::from_slice(&data)?;
        Ok(snapshot)
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        // Serialize before touching the disk so a failure leaves the old file intact
        let data = serde_json::to_vec(snapshot)?;

        let temp_path = self.temp_path();
        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(&data)?;
            file.sync_all()
        });
        if let Err(e) = written {
            if temp_path.is_file() {
                let _ = fs::remove_file(&temp_path);
            }
            tracing::error!(path = %temp_path.display(), error = %e, "Failed to write snapshot");
            return Err(e.into());
        }

        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "Snapshot written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
