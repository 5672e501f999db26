//! Expense tools: log, summarize and list categories.

use super::{parse_args, to_json, ToolContext, ToolDefinition, ToolResult};
use crate::model::expense::{ExpenseQuery, NewExpense};
use serde_json::{json, Value};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "log_expense",
            "Record a business expense with amount, category, and description.",
            json!({
                "type": "object",
                "required": ["amount", "category", "description"],
                "properties": {
                    "amount": { "type": "number" },
                    "category": { "type": "string" },
                    "description": { "type": "string" },
                    "date": { "type": "string", "description": "YYYY-MM-DD or 'today'" },
                    "payment_method": { "type": "string" }
                }
            }),
        ),
        ToolDefinition::new(
            "get_expense_summary",
            "Get expense totals and breakdown by category for a date range.",
            json!({
                "type": "object",
                "properties": {
                    "start_date": { "type": "string", "description": "Inclusive lower bound" },
                    "end_date": { "type": "string", "description": "Inclusive upper bound" },
                    "category": { "type": "string" }
                }
            }),
        ),
        ToolDefinition::new(
            "categorize_expenses",
            "List all unique expense categories.",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
    ]
}

pub fn log_expense(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let request: NewExpense = parse_args("log_expense", arguments)?;
    to_json(&ctx.expenses().log(request)?)
}

pub fn get_expense_summary(ctx: &ToolContext<'_>, arguments: &Value) -> ToolResult<Value> {
    let query: ExpenseQuery = parse_args("get_expense_summary", arguments)?;
    to_json(&ctx.expenses().summarize(&query))
}

pub fn categorize_expenses(ctx: &ToolContext<'_>, _arguments: &Value) -> ToolResult<Value> {
    to_json(&ctx.expenses().list_categories())
}
