//! Note tools: create, search, update and tag replacement.

use super::{parse_args, string_list_schema, to_json, ToolContext, ToolDefinition, ToolResult};
use crate::model::note::{NewNote, NotePatch};
use crate::model::RecordId;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct SearchNotesArgs {
    query: String,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteArgs {
    note_id: RecordId,
    #[serde(flatten)]
    patch: NotePatch,
}

#[derive(Debug, Deserialize)]
struct TagNoteArgs {
    note_id: RecordId,
    tags: Vec<String>,
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "create_note",
            "Create a new note with optional tags for organization.",
            json!({
                "type": "object",
                "required": ["title", "content"],
                "properties": {
                    "title": { "type": "string" },
                    "content": { "type": "string" },
                    "tags": string_list_schema("Tags for organization")
                }
            }),
        ),
        ToolDefinition::new(
            "search_notes",
            "Search notes by keyword in title or content, optionally filtered by tags.",
            json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": { "type": "string", "description": "Case-insensitive keyword" },
                    "tags": string_list_schema("Keep notes sharing at least one of these tags")
                }
            }),
        ),
        ToolDefinition::new(
            "update_note",
            "Update the title, content, or tags of an existing note.",
            json!({
                "type": "object",
                "required": ["note_id"],
                "properties": {
                    "note_id": { "type": "integer" },
                    "title": { "type": "string" },
                    "content": { "type": "string" },
                    "tags": string_list_schema("Replacement tag list")
                }
            }),
        ),
        ToolDefinition::new(
            "tag_note",
            "Replace the tags on an existing note.",
            json!({
                "type": "object",
                "required": ["note_id", "tags"],
                "properties": {
                    "note_id": { "type": "integer" },
                    "tags": string_list_schema("Replacement tag list")
                }
            }),
        ),
    ]
}

pub fn create_note(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let request: NewNote = parse_args("create_note", arguments)?;
    to_json(&ctx.notes().create(request)?)
}

pub fn search_notes(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: SearchNotesArgs = parse_args("search_notes", arguments)?;
    to_json(&ctx.notes().search(&args.query, args.tags.as_deref()))
}

pub fn update_note(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: UpdateNoteArgs = parse_args("update_note", arguments)?;
    to_json(&ctx.notes().update(args.note_id, args.patch)?)
}

pub fn tag_note(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let args: TagNoteArgs = parse_args("tag_note", arguments)?;
    to_json(&ctx.notes().tag(args.note_id, args.tags)?)
}
