//! Persistence for manually logged readings
//!
//! The log is a single JSON array that is read whole and rewritten whole.
//! Nothing is cached between operations.

use crate::error::WeatherLogError;
use crate::models::WeatherEntry;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Append-only collection of [`WeatherEntry`] records
pub trait LogStore {
    /// Read every entry. A store that has never been written is empty.
    fn load(&self) -> crate::Result<Vec<WeatherEntry>>;

    /// Replace the stored entries with `entries`
    fn save_all(&self, entries: &[WeatherEntry]) -> crate::Result<()>;

    /// Add one entry after the existing ones. Duplicate dates are kept.
    fn append(&self, entry: WeatherEntry) -> crate::Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save_all(&entries)
    }

    /// Entries for display
    fn view_all(&self) -> crate::Result<Vec<WeatherEntry>> {
        self.load()
    }
}

/// Log kept as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl LogStore for JsonFileStore {
    #[tracing::instrument(name = "load_log", level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> crate::Result<Vec<WeatherEntry>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No log file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<WeatherEntry> =
            serde_json::from_slice(&bytes).map_err(|source| WeatherLogError::MalformedLog {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} entries", entries.len());
        Ok(entries)
    }

    /// Writes to a temporary file next to the log and renames it into place,
    /// so an interrupted save leaves the previous log intact.
    #[tracing::instrument(name = "save_log", level = "debug", skip(self, entries), fields(path = %self.path.display()))]
    fn save_all(&self, entries: &[WeatherEntry]) -> crate::Result<()> {
        let json = serde_json::to_vec(entries).map_err(std::io::Error::other)?;

        let mut temp_file = NamedTempFile::new_in(self.parent_dir())?;
        temp_file.write_all(&json)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        info!("Saved {} entries", entries.len());
        Ok(())
    }
}

/// Log held in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<Vec<WeatherEntry>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<WeatherEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl LogStore for InMemoryStore {
    fn load(&self) -> crate::Result<Vec<WeatherEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_all(&self, entries: &[WeatherEntry]) -> crate::Result<()> {
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.to_vec();
        Ok(())
    }
}
