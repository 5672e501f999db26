//! Expense records, requests and summaries.
//!
//! # Invariants
//! - `date` is a canonical `YYYY-MM-DD` date.
//! - `amount` is finite; sign and magnitude are not validated.
//! - Summary sums saturate at `±f64::MAX` instead of overflowing to infinity,
//!   so totals always encode as JSON numbers.

use super::{Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_at: String,
}

impl Record for Expense {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Input for logging an expense. `date` defaults to the current date.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date: None,
            payment_method: None,
        }
    }
}

/// Summary filters. Date bounds are inclusive and normalized independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Totals over the filtered expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    pub expenses: Vec<Expense>,
}

impl ExpenseSummary {
    /// Builds totals from an already filtered expense list.
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        let mut total = 0.0;
        let mut by_category = BTreeMap::new();
        for expense in &expenses {
            total = saturating_add(total, expense.amount);
            let slot = by_category.entry(expense.category.clone()).or_insert(0.0);
            *slot = saturating_add(*slot, expense.amount);
        }
        Self {
            total,
            by_category,
            expenses,
        }
    }
}

// Operands are finite, so the sum is finite or an infinity, never NaN.
fn saturating_add(sum: f64, amount: f64) -> f64 {
    let next = sum + amount;
    if next.is_infinite() {
        f64::MAX.copysign(next)
    } else {
        next
    }
}
