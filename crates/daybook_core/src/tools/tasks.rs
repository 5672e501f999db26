//! Task tools: create, list, complete, update and daily agenda.

use super::{parse_args, string_list_schema, to_json, ToolContext, ToolDefinition, ToolResult};
use crate::model::task::{NewTask, TaskFilter, TaskPatch};
use crate::model::RecordId;
use serde::Deserialize;
use serde_json::{json, Value};

const PRIORITY_VALUES: [&str; 3] = ["low", "medium", "high"];
const STATUS_VALUES: [&str; 3] = ["pending", "in_progress", "completed"];

#[derive(Debug, Deserialize)]
struct CompleteTaskArgs {
    task_id: RecordId,
}

#[derive(Debug, Deserialize)]
struct UpdateTaskArgs {
    task_id: RecordId,
    #[serde(flatten)]
    patch: TaskPatch,
}

#[derive(Debug, Default, Deserialize)]
struct AgendaArgs {
    #[serde(default)]
    date: Option<String>,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "create_task",
            "Create a new task with due date, priority, and assignee. Supports dates like 'today', 'tomorrow', 'next week'.",
            json!({
                "type": "object",
                "required": ["title"],
                "properties": {
                    "title": { "type": "string", "description": "Task title" },
                    "description": { "type": "string", "description": "Optional detailed description" },
                    "due_date": { "type": "string", "description": "Due date: YYYY-MM-DD, 'today', 'tomorrow', 'next week'" },
                    "priority": { "type": "string", "enum": PRIORITY_VALUES, "description": "Task priority level" },
                    "assignee": { "type": "string", "description": "Person responsible" },
                    "tags": string_list_schema("Tags for categorization")
                }
            }),
        ),
        ToolDefinition::new(
            "list_tasks",
            "List tasks with optional filtering by status, priority, due date, assignee, or tags.",
            json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": STATUS_VALUES },
                    "priority": { "type": "string", "enum": PRIORITY_VALUES },
                    "due_before": { "type": "string", "description": "Show tasks due on or before this date" },
                    "assignee": { "type": "string" },
                    "tags": string_list_schema("Keep tasks sharing at least one of these tags")
                }
            }),
        ),
        ToolDefinition::new(
            "complete_task",
            "Mark a task as completed.",
            json!({
                "type": "object",
                "required": ["task_id"],
                "properties": {
                    "task_id": { "type": "integer", "description": "ID of the task to complete" }
                }
            }),
        ),
        ToolDefinition::new(
            "update_task",
            "Update task details like title, due date, priority, or status.",
            json!({
                "type": "object",
                "required": ["task_id"],
                "properties": {
                    "task_id": { "type": "integer" },
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "due_date": { "type": "string" },
                    "priority": { "type": "string", "enum": PRIORITY_VALUES },
                    "status": { "type": "string", "enum": STATUS_VALUES },
                    "assignee": { "type": "string" },
                    "tags": string_list_schema("Replacement tag list")
                }
            }),
        ),
        ToolDefinition::new(
            "get_daily_agenda",
            "Get the task agenda for a day: due tasks, overdue items, and upcoming tasks.",
            json!({
                "type": "object",
                "properties": {
                    "date": { "type": "string", "description": "Date to view (defaults to today)" }
                }
            }),
        ),
    ]
}

pub fn create_task(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let request: NewTask = parse_args("create_task", arguments)?;
    to_json(&ctx.tasks().create(request)?)
}

pub fn list_tasks(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let filter: TaskFilter = parse_args("list_tasks", arguments)?;
    to_json(&ctx.tasks().list(&filter))
}

pub fn complete_task(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: CompleteTaskArgs = parse_args("complete_task", arguments)?;
    to_json(&ctx.tasks().complete(args.task_id)?)
}

pub fn update_task(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: UpdateTaskArgs = parse_args("update_task", arguments)?;
    to_json(&ctx.tasks().update(args.task_id, args.patch)?)
}

pub fn get_daily_agenda(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: AgendaArgs = parse_args("get_daily_agenda", arguments)?;
    to_json(&ctx.tasks().daily_agenda(args.date.as_deref()))
}
