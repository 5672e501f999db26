//! Store configuration.
//!
//! # Responsibility
//! - Carry the data root handed to the persistence adapter at construction.
//! - Name the environment variable and default binaries resolve it from.
//!
//! # Invariants
//! - Core never reads a data root from global state; callers pass a
//!   `StoreConfig` explicitly.
//!
//! # See also
//! - `daybook_cli` resolves `DAYBOOK_DATA_DIR` through clap's `env` fallback.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "DAYBOOK_DATA_DIR";
/// Data root used when no override is provided, relative to the working dir.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Location of the collection documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }
}
