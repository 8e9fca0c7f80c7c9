use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::models::Reading;
use crate::utils::error::PersistError;

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Holds the single most recent [`Reading`].
#[cfg_attr(test, mockall::automock)]
pub trait ReadingStore: Send + Sync {
    /// Replace whatever was stored before.
    fn save(&self, reading: &Reading) -> Result<(), PersistError>;

    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Reading>, PersistError>;
}

/// JSON record on the local filesystem, indented for people to read.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

pub fn to_pretty_json(reading: &Reading) -> Result<Vec<u8>, PersistError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    reading.serialize(&mut serializer)?;
    Ok(buf)
}

impl ReadingStore for JsonFileStore {
    fn save(&self, reading: &Reading) -> Result<(), PersistError> {
        let contents = to_pretty_json(reading)?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    fn load(&self) -> Result<Option<Reading>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
