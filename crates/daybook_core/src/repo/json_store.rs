//! Collection repository contracts and JSON document implementation.
//!
//! # Responsibility
//! - Load and save whole collections as pretty-printed JSON arrays.
//! - Create the storage root once when a store is opened.
//! - Serialize load-mutate-save cycles inside one process.
//!
//! # Invariants
//! - A missing or unreadable document loads as an empty collection; the
//!   failure is logged and never returned to the caller.
//! - Save failures are returned; nothing is retried.
//! - Each save overwrites the entire document.

use crate::config::StoreConfig;
use crate::model::{next_record_id, Record, RecordId};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Named collection persisted as one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Tasks,
    Notes,
    Expenses,
    Events,
    Reminders,
}

impl Collection {
    /// Every collection, in export order.
    pub const ALL: [Collection; 5] = [
        Self::Tasks,
        Self::Notes,
        Self::Expenses,
        Self::Events,
        Self::Reminders,
    ];

    /// Stable collection name, also used as the document base name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Notes => "notes",
            Self::Expenses => "expenses",
            Self::Events => "events",
            Self::Reminders => "reminders",
        }
    }

    /// Parses a collection name (`tasks`, `notes`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str() == value)
    }

    /// Singular label used in user-facing messages.
    pub fn record_label(self) -> &'static str {
        match self {
            Self::Tasks => "task",
            Self::Notes => "note",
            Self::Expenses => "expense",
            Self::Events => "event",
            Self::Reminders => "reminder",
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-level error for persistence and lookups.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced id is absent from its collection.
    NotFound {
        collection: Collection,
        id: RecordId,
    },
    /// Storage root or document could not be written.
    Io { path: PathBuf, source: io::Error },
    /// Collection could not be encoded as JSON.
    Serialize {
        collection: Collection,
        source: serde_json::Error,
    },
    /// Export requested for a collection name that does not exist.
    UnknownCollection(String),
    /// The collection already holds `RecordId::MAX`; no next id exists.
    IdsExhausted { collection: Collection },
    /// Expense amount is NaN or infinite.
    InvalidAmount(f64),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "{} {id} not found", capitalize(collection.record_label()))
            }
            Self::Io { path, source } => {
                write!(f, "storage I/O failed at `{}`: {source}", path.display())
            }
            Self::Serialize { collection, source } => {
                write!(f, "failed to encode collection `{collection}`: {source}")
            }
            Self::UnknownCollection(name) => write!(f, "unknown collection: `{name}`"),
            Self::IdsExhausted { collection } => {
                write!(f, "no ids left in collection `{collection}`")
            }
            Self::InvalidAmount(amount) => {
                write!(f, "expense amount must be a finite number, got {amount}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
            Self::NotFound { .. }
            | Self::UnknownCollection(_)
            | Self::IdsExhausted { .. }
            | Self::InvalidAmount(_) => None,
        }
    }
}

/// Repository interface for whole-collection persistence.
pub trait CollectionRepository {
    /// Loads every record of a collection; failures yield an empty list.
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T>;

    /// Loads a collection document without decoding into records.
    fn load_raw(&self, collection: Collection) -> Value;

    /// Overwrites a collection document with `records`.
    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> StoreResult<()>;

    /// Runs one exclusive load-mutate-save cycle.
    ///
    /// The collection is saved only when `mutate` returns `Ok`.
    fn update<T, O, F>(&self, collection: Collection, mutate: F) -> StoreResult<O>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> StoreResult<O>;
}

/// JSON-document-backed collection store rooted at one directory.
#[derive(Debug)]
pub struct JsonStore {
    config: StoreConfig,
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Opens a store, creating the data root when absent.
    ///
    /// # Errors
    /// - Returns `StoreError::Io` when the data root cannot be created.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let data_dir = config.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|source| {
            error!(
                "event=store_open module=repo status=error error_code=create_dir_failed path={} error={}",
                data_dir.display(),
                source
            );
            StoreError::Io {
                path: data_dir.clone(),
                source,
            }
        })?;
        debug!(
            "event=store_open module=repo status=ok path={}",
            data_dir.display()
        );

        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the document backing `collection`.
    pub fn document_path(&self, collection: Collection) -> PathBuf {
        self.config.data_dir().join(collection.file_name())
    }

    fn read_document(&self, collection: Collection) -> Option<String> {
        let path = self.document_path(collection);
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                error!(
                    "event=collection_load module=repo status=error collection={} error_code=read_failed error={}",
                    collection, err
                );
                None
            }
        }
    }
}

impl CollectionRepository for JsonStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let Some(raw) = self.read_document(collection) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=error collection={} error_code=parse_failed error={}",
                    collection, err
                );
                Vec::new()
            }
        }
    }

    fn load_raw(&self, collection: Collection) -> Value {
        let Some(raw) = self.read_document(collection) else {
            return Value::Array(Vec::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=error collection={} mode=raw error_code=parse_failed error={}",
                    collection, err
                );
                Value::Array(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let encoded = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Serialize { collection, source })?;

        let path = self.document_path(collection);
        if let Err(source) = fs::write(&path, encoded) {
            error!(
                "event=collection_save module=repo status=error collection={} duration_ms={} error_code=write_failed error={}",
                collection,
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::Io { path, source });
        }

        debug!(
            "event=collection_save module=repo status=ok collection={} records={} duration_ms={}",
            collection,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn update<T, O, F>(&self, collection: Collection, mutate: F) -> StoreResult<O>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> StoreResult<O>,
    {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load::<T>(collection);
        let output = mutate(&mut records)?;
        self.save(collection, &records)?;
        Ok(output)
    }
}

/// Allocates the next id for a record appended to `records`.
///
/// # Errors
/// - `IdsExhausted` when the collection already holds `RecordId::MAX`.
pub(crate) fn allocate_id<R: Record>(
    collection: Collection,
    records: &[R],
) -> StoreResult<RecordId> {
    next_record_id(records).ok_or_else(|| {
        error!(
            "event=id_allocate module=repo status=error collection={} error_code=ids_exhausted",
            collection
        );
        StoreError::IdsExhausted { collection }
    })
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, StoreError};

    #[test]
    fn collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::parse("alerts"), None);
    }

    #[test]
    fn not_found_message_names_record_kind() {
        let err = StoreError::NotFound {
            collection: Collection::Tasks,
            id: 42,
        };
        assert_eq!(err.to_string(), "Task 42 not found");
    }
}
