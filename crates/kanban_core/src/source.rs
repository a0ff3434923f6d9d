//! Board data sources.
//!
//! # Responsibility
//! - Define the read/write boundary the board loads from and saves to.
//! - Provide file-backed and in-memory implementations.
//!
//! # Invariants
//! - A read either returns the stored bytes or fails; it never retries.
//! - Writes replace the stored content fully.

use log::{error, info};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure of the storage medium behind a data source.
#[derive(Debug)]
pub enum SourceError {
    Io {
        location: String,
        error: std::io::Error,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { location, error } => write!(f, "data source `{location}` failed: {error}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
        }
    }
}

/// Origin and destination of a board's persisted state.
pub trait DataSource {
    /// Human-readable location used in errors and logs.
    fn describe(&self) -> String;
    fn read(&self) -> SourceResult<Vec<u8>>;
    fn write(&self, bytes: &[u8]) -> SourceResult<()>;
}

/// Board document stored in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> SourceError {
        SourceError::Io {
            location: self.describe(),
            error,
        }
    }
}

impl DataSource for FileDataSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> SourceResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|err| {
            error!(
                "event=source_read module=source status=error mode=file error_kind={:?}",
                err.kind()
            );
            self.io_error(err)
        })
    }

    fn write(&self, bytes: &[u8]) -> SourceResult<()> {
        std::fs::write(&self.path, bytes).map_err(|err| {
            error!(
                "event=source_write module=source status=error mode=file error_kind={:?}",
                err.kind()
            );
            self.io_error(err)
        })?;
        info!(
            "event=source_write module=source status=ok mode=file bytes={}",
            bytes.len()
        );
        Ok(())
    }
}

/// Board document held in memory.
#[derive(Debug, Default)]
pub struct MemoryDataSource {
    label: String,
    bytes: RefCell<Vec<u8>>,
}

impl MemoryDataSource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            bytes: RefCell::new(bytes.into()),
        }
    }

    /// Creates an in-memory source holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new("memory", text.as_bytes())
    }

    /// Returns the stored bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }

    /// Returns the stored bytes as text, replacing invalid UTF-8.
    pub fn contents_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl DataSource for MemoryDataSource {
    fn describe(&self) -> String {
        format!("memory:{}", self.label)
    }

    fn read(&self) -> SourceResult<Vec<u8>> {
        Ok(self.contents())
    }

    fn write(&self, bytes: &[u8]) -> SourceResult<()> {
        *self.bytes.borrow_mut() = bytes.to_vec();
        Ok(())
    }
}
