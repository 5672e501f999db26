//! Note records and requests.
//!
//! # Invariants
//! - `updated_at` is refreshed on every mutation, including tag changes.
//! - Tags are stored as given; matching is exact and case-sensitive.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for Note {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: None,
        }
    }
}

/// Partial note update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
