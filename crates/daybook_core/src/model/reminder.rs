//! Reminder records and requests.
//!
//! # Invariants
//! - New reminders start as `active`.
//! - Nothing in core moves a reminder out of `active`; due reminders are
//!   surfaced by query only.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// Reminder lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    #[default]
    Active,
    Triggered,
    Dismissed,
}

/// Persisted reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: RecordId,
    pub message: String,
    pub remind_at: String,
    pub status: ReminderStatus,
    pub created_at: String,
}

impl Record for Reminder {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Input for setting a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewReminder {
    pub message: String,
    pub remind_at: String,
}

impl NewReminder {
    pub fn new(message: impl Into<String>, remind_at: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            remind_at: remind_at.into(),
        }
    }
}
