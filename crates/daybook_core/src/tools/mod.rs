//! Tool facade: named, schema-described operations over the stores.
//!
//! # Responsibility
//! - Publish one tool definition (name, description, JSON input schema) per
//!   store or aggregate operation.
//! - Decode JSON arguments into typed requests and encode results as JSON.
//!
//! # Invariants
//! - Unknown tool names fail with `ToolError::UnknownTool`; the registry
//!   stays usable afterwards.
//! - Argument decoding never panics; bad input maps to
//!   `ToolError::InvalidArguments`.
//!
//! # See also
//! - `daybook_cli` for the `tools` and `call` commands.

pub mod calendar;
pub mod expenses;
pub mod notes;
pub mod reports;
pub mod tasks;

use crate::repo::json_store::{JsonStore, StoreError};
use crate::service::event_service::EventService;
use crate::service::expense_service::ExpenseService;
use crate::service::note_service::NoteService;
use crate::service::reminder_service::ReminderService;
use crate::service::summary_service::SummaryService;
use crate::service::task_service::TaskService;
use crate::time::clock::{Clock, SharedClock};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ToolResult<T> = Result<T, ToolError>;

/// Tool-layer error.
#[derive(Debug)]
pub enum ToolError {
    /// No tool is registered under this name.
    UnknownTool(String),
    /// Arguments do not match the tool's input schema.
    InvalidArguments { tool: String, message: String },
    /// Store operation failed.
    Store(StoreError),
    /// Result could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown tool: {name}"),
            Self::InvalidArguments { tool, message } => {
                write!(f, "invalid arguments for `{tool}`: {message}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tool result: {err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnknownTool(_) | Self::InvalidArguments { .. } => None,
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Tool definition published to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Borrowed store and clock handed to tool handlers.
pub struct ToolContext<'a> {
    pub store: &'a JsonStore,
    pub clock: &'a dyn Clock,
}

impl<'a> ToolContext<'a> {
    pub fn tasks(&self) -> TaskService<'a, JsonStore> {
        TaskService::new(self.store, self.clock)
    }

    pub fn notes(&self) -> NoteService<'a, JsonStore> {
        NoteService::new(self.store, self.clock)
    }

    pub fn expenses(&self) -> ExpenseService<'a, JsonStore> {
        ExpenseService::new(self.store, self.clock)
    }

    pub fn events(&self) -> EventService<'a, JsonStore> {
        EventService::new(self.store, self.clock)
    }

    pub fn reminders(&self) -> ReminderService<'a, JsonStore> {
        ReminderService::new(self.store, self.clock)
    }

    pub fn summaries(&self) -> SummaryService<'a, JsonStore> {
        SummaryService::new(self.store, self.clock)
    }
}

/// Registry of available tools bound to one store.
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    store: JsonStore,
    clock: SharedClock,
}

impl ToolRegistry {
    /// Creates a registry exposing every daybook tool.
    pub fn new(store: JsonStore, clock: SharedClock) -> Self {
        let mut tools = Vec::new();
        tools.extend(tasks::definitions());
        tools.extend(calendar::definitions());
        tools.extend(notes::definitions());
        tools.extend(expenses::definitions());
        tools.extend(reports::definitions());
        Self {
            tools,
            store,
            clock,
        }
    }

    /// Lists tools as `{name, description, inputSchema}` objects.
    pub fn list_tools(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema
                })
            })
            .collect()
    }

    /// Calls a tool by name with JSON arguments.
    ///
    /// `Value::Null` arguments are treated as an empty object.
    pub fn call_tool(&self, name: &str, arguments: &Value) -> ToolResult<Value> {
        let started_at = Instant::now();
        let ctx = ToolContext {
            store: &self.store,
            clock: self.clock.as_ref(),
        };

        let result = match name {
            "create_task" => tasks::create_task(&ctx, arguments),
            "list_tasks" => tasks::list_tasks(&ctx, arguments),
            "complete_task" => tasks::complete_task(&ctx, arguments),
            "update_task" => tasks::update_task(&ctx, arguments),
            "get_daily_agenda" => tasks::get_daily_agenda(&ctx, arguments),
            "schedule_event" => calendar::schedule_event(&ctx, arguments),
            "list_upcoming_events" => calendar::list_upcoming_events(&ctx, arguments),
            "set_reminder" => calendar::set_reminder(&ctx, arguments),
            "create_alert" => calendar::create_alert(&ctx, arguments),
            "list_alerts" => calendar::list_alerts(&ctx, arguments),
            "create_note" => notes::create_note(&ctx, arguments),
            "search_notes" => notes::search_notes(&ctx, arguments),
            "update_note" => notes::update_note(&ctx, arguments),
            "tag_note" => notes::tag_note(&ctx, arguments),
            "log_expense" => expenses::log_expense(&ctx, arguments),
            "get_expense_summary" => expenses::get_expense_summary(&ctx, arguments),
            "categorize_expenses" => expenses::categorize_expenses(&ctx, arguments),
            "get_today_schedule" => reports::get_today_schedule(&ctx, arguments),
            "generate_daily_summary" => reports::generate_daily_summary(&ctx, arguments),
            "export_data" => reports::export_data(&ctx, arguments),
            _ => Err(ToolError::UnknownTool(name.to_string())),
        };

        match &result {
            Ok(_) => info!(
                "event=tool_call module=tools status=ok tool={} duration_ms={}",
                name,
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=tool_call module=tools status=error tool={} duration_ms={} error={}",
                name,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Decodes tool arguments into a typed request.
pub fn parse_args<T: DeserializeOwned>(tool: &str, arguments: &Value) -> ToolResult<T> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other.clone(),
    };
    serde_json::from_value(arguments).map_err(|err| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: err.to_string(),
    })
}

/// Encodes a tool result as JSON.
pub fn to_json<T: Serialize>(value: &T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(ToolError::Encode)
}

/// JSON schema fragment for an optional list of strings.
pub(crate) fn string_list_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}
