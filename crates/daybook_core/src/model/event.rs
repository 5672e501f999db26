//! Calendar event records and requests.
//!
//! # Invariants
//! - `start_time` and `end_time` are canonical RFC 3339 timestamps, or the
//!   `Invalid Date` marker when creation input could not be parsed.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    pub created_at: String,
}

impl Record for CalendarEvent {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Input for scheduling an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start_time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start_time: start_time.into(),
            ..Self::default()
        }
    }
}
