//! Aggregate tools: today's schedule, daily digest and export.

use super::{parse_args, to_json, ToolContext, ToolDefinition, ToolResult};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
struct SummaryArgs {
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportArgs {
    data_type: String,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "get_today_schedule",
            "Get today's schedule: events and tasks due today.",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        ToolDefinition::new(
            "generate_daily_summary",
            "Generate an end-of-day summary with tasks, events, and expenses.",
            json!({
                "type": "object",
                "properties": {
                    "date": { "type": "string", "description": "Date for summary (defaults to today)" }
                }
            }),
        ),
        ToolDefinition::new(
            "export_data",
            "Export raw tasks, notes, expenses, events, or reminders as JSON for backup or analysis.",
            json!({
                "type": "object",
                "required": ["data_type"],
                "properties": {
                    "data_type": {
                        "type": "string",
                        "enum": ["tasks", "notes", "expenses", "events", "reminders", "all"],
                        "description": "Type of data to export"
                    }
                }
            }),
        ),
    ]
}

pub fn get_today_schedule(ctx: &ToolContext<'_>, _arguments: &Value) -> ToolResult<Value> {
    to_json(&ctx.summaries().today_schedule())
}

pub fn generate_daily_summary(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: SummaryArgs = parse_args("generate_daily_summary", arguments)?;
    let summary = ctx.summaries().daily_summary(args.date.as_deref());
    Ok(json!({ "summary": summary }))
}

pub fn export_data(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: ExportArgs = parse_args("export_data", arguments)?;
    Ok(ctx.summaries().export_all(&args.data_type)?)
}
