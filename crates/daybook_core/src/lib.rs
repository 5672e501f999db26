//! Core domain logic for daybook.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod time;
pub mod tools;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{CalendarEvent, NewEvent};
pub use model::expense::{Expense, ExpenseQuery, ExpenseSummary, NewExpense};
pub use model::note::{NewNote, Note, NotePatch};
pub use model::reminder::{NewReminder, Reminder, ReminderStatus};
pub use model::task::{
    DailyAgenda, NewTask, Task, TaskFilter, TaskPatch, TaskPriority, TaskStatus,
};
pub use model::{Record, RecordId};
pub use repo::json_store::{Collection, CollectionRepository, JsonStore, StoreError, StoreResult};
pub use service::event_service::EventService;
pub use service::expense_service::ExpenseService;
pub use service::note_service::NoteService;
pub use service::reminder_service::ReminderService;
pub use service::summary_service::{ExportScope, SummaryService, TodaySchedule};
pub use service::task_service::TaskService;
pub use time::clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use time::dates::{normalize_date, normalize_timestamp, INVALID_TIMESTAMP};
pub use tools::{ToolDefinition, ToolError, ToolRegistry, ToolResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
