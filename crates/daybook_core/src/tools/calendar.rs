//! Calendar and reminder tools.
//!
//! `create_alert` and `list_alerts` are alert-flavored names for the
//! reminder store; alerts are not a separate collection.

use super::{parse_args, string_list_schema, to_json, ToolContext, ToolDefinition, ToolResult};
use crate::model::event::NewEvent;
use crate::model::reminder::NewReminder;
use crate::service::event_service::DEFAULT_UPCOMING_DAYS;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
struct UpcomingArgs {
    #[serde(default)]
    days: Option<f64>,
}

impl UpcomingArgs {
    /// Fractional windows are truncated; zero or absent means the default.
    fn window_days(&self) -> i64 {
        match self.days.map(f64::trunc) {
            Some(days) if days != 0.0 && days.is_finite() => days as i64,
            _ => DEFAULT_UPCOMING_DAYS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateAlertArgs {
    message: String,
    trigger_time: String,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "schedule_event",
            "Add a calendar event with start time, optional end time, location, and attendees.",
            json!({
                "type": "object",
                "required": ["title", "start_time"],
                "properties": {
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "start_time": { "type": "string", "description": "ISO datetime: 2025-10-06T14:00:00" },
                    "end_time": { "type": "string" },
                    "location": { "type": "string" },
                    "attendees": string_list_schema("Attendee names or emails")
                }
            }),
        ),
        ToolDefinition::new(
            "list_upcoming_events",
            "List upcoming calendar events for the next N days.",
            json!({
                "type": "object",
                "properties": {
                    "days": { "type": "number", "description": "Number of days to look ahead (default: 7)" }
                }
            }),
        ),
        ToolDefinition::new(
            "set_reminder",
            "Set a reminder for a specific time.",
            json!({
                "type": "object",
                "required": ["message", "remind_at"],
                "properties": {
                    "message": { "type": "string" },
                    "remind_at": { "type": "string", "description": "ISO datetime" }
                }
            }),
        ),
        ToolDefinition::new(
            "create_alert",
            "Create a custom alert for an important deadline or threshold.",
            json!({
                "type": "object",
                "required": ["message", "trigger_time"],
                "properties": {
                    "message": { "type": "string" },
                    "trigger_time": { "type": "string", "description": "ISO datetime" }
                }
            }),
        ),
        ToolDefinition::new(
            "list_alerts",
            "List active alerts and reminders whose time has come.",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
    ]
}

pub fn schedule_event(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let request: NewEvent = parse_args("schedule_event", arguments)?;
    to_json(&ctx.events().create(request)?)
}

pub fn list_upcoming_events(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: UpcomingArgs = parse_args("list_upcoming_events", arguments)?;
    to_json(&ctx.events().list_upcoming(args.window_days()))
}

pub fn set_reminder(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let request: NewReminder = parse_args("set_reminder", arguments)?;
    to_json(&ctx.reminders().create(request)?)
}

pub fn create_alert(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: CreateAlertArgs = parse_args("create_alert", arguments)?;
    let request = NewReminder::new(args.message, args.trigger_time);
    to_json(&ctx.reminders().create(request)?)
}

pub fn list_alerts(ctx: &ToolContext<'_>, _arguments: &Value) -> ToolResult<Value> {
    to_json(&ctx.reminders().list_due())
}

#[cfg(test)]
mod tests {
    use super::UpcomingArgs;

    #[test]
    fn upcoming_window_defaults_and_truncates() {
        assert_eq!(UpcomingArgs { days: None }.window_days(), 7);
        assert_eq!(UpcomingArgs { days: Some(0.0) }.window_days(), 7);
        assert_eq!(UpcomingArgs { days: Some(2.9) }.window_days(), 2);
        assert_eq!(UpcomingArgs { days: Some(30.0) }.window_days(), 30);
    }
}
