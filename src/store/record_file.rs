// Reading and writing a JSON array of records
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{
    self,
    OpenOptions,
};
use std::io::Read;
use std::marker::PhantomData;
use std::path::{
    Path,
    PathBuf,
};
use tracing::debug;

/// Errors raised while loading or saving a `RecordFile`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the record file.
        path:   PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file contents were not a valid record array.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Path of the record file.
        path:   PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// A file holding a pretty-printed JSON array of `R`.
#[derive(Debug)]
pub struct RecordFile<R> {
    path:    PathBuf,
    _record: PhantomData<R>,
}

impl<R> RecordFile<R>
where
    R: DeserializeOwned + Serialize,
{
    /// Returns a `RecordFile` stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:    path.into(),
            _record: PhantomData,
        }
    }

    /// The location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path:   self.path.clone(),
            source: source,
        }
    }

    fn create_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))
            },
            _ => Ok(()),
        }
    }

    /// Loads every record in the file.
    ///
    /// A missing file is created empty. An empty file holds no records.
    pub fn load(&self) -> Result<Vec<R>, StoreError> {
        debug!("load: Reading records from {}", self.path.display());

        self.create_parent()?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| self.io_error(e))?;

        if contents.trim().is_empty() {
            debug!("load: {} is empty", self.path.display());

            return Ok(Vec::new());
        }

        let records: Vec<R> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Json {
                path:   self.path.clone(),
                source: e,
            })?;

        debug!(
            "load: Read {} records from {}",
            records.len(),
            self.path.display(),
        );

        Ok(records)
    }

    /// Replaces the file contents with `records`.
    pub fn save(&self, records: &[R]) -> Result<(), StoreError> {
        debug!(
            "save: Writing {} records to {}",
            records.len(),
            self.path.display(),
        );

        self.create_parent()?;

        let data = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Json {
                path:   self.path.clone(),
                source: e,
            })?;

        fs::write(&self.path, data).map_err(|e| self.io_error(e))
    }
}
