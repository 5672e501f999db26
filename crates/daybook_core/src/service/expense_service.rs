//! Expense use-case service.
//!
//! # Invariants
//! - Logged dates are canonical; an absent date means the current date.
//! - Summary bounds are inclusive and normalized independently.
//! - Only finite amounts are stored.
//!
//! # See also
//! - `model::expense::ExpenseSummary` for how totals are accumulated.

use crate::model::expense::{Expense, ExpenseQuery, ExpenseSummary, NewExpense};
use crate::repo::json_store::{
    allocate_id, Collection, CollectionRepository, StoreError, StoreResult,
};
use crate::time::clock::Clock;
use crate::time::dates::{format_timestamp, normalize_date, today};
use log::{info, warn};
use std::collections::BTreeSet;

/// Expense service facade over a collection repository.
pub struct ExpenseService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> ExpenseService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Records one expense.
    ///
    /// # Errors
    /// - `InvalidAmount` when `amount` is NaN or infinite; nothing is written.
    pub fn log(&self, request: NewExpense) -> StoreResult<Expense> {
        if !request.amount.is_finite() {
            warn!("event=expense_log module=service status=rejected reason=non_finite_amount");
            return Err(StoreError::InvalidAmount(request.amount));
        }
        let now = self.clock.now();
        let expense = self
            .repo
            .update(Collection::Expenses, |expenses: &mut Vec<Expense>| {
                let expense = Expense {
                    id: allocate_id(Collection::Expenses, expenses)?,
                    amount: request.amount,
                    category: request.category,
                    description: request.description,
                    date: match request.date.as_deref() {
                        Some(value) => normalize_date(value, now),
                        None => today(now),
                    },
                    payment_method: request.payment_method,
                    created_at: format_timestamp(now),
                };
                expenses.push(expense.clone());
                Ok(expense)
            })?;

        info!(
            "event=expense_log module=service status=ok expense_id={}",
            expense.id
        );
        Ok(expense)
    }

    /// Sums expenses inside the optional date range and category.
    pub fn summarize(&self, query: &ExpenseQuery) -> ExpenseSummary {
        let now = self.clock.now();
        let start = query
            .start_date
            .as_deref()
            .map(|value| normalize_date(value, now));
        let end = query
            .end_date
            .as_deref()
            .map(|value| normalize_date(value, now));

        let matching = self
            .repo
            .load::<Expense>(Collection::Expenses)
            .into_iter()
            .filter(|expense| start.as_deref().map_or(true, |bound| expense.date.as_str() >= bound))
            .filter(|expense| end.as_deref().map_or(true, |bound| expense.date.as_str() <= bound))
            .filter(|expense| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |category| expense.category == category)
            })
            .collect();

        ExpenseSummary::from_expenses(matching)
    }

    /// Returns distinct categories sorted by name.
    pub fn list_categories(&self) -> Vec<String> {
        self.repo
            .load::<Expense>(Collection::Expenses)
            .into_iter()
            .map(|expense| expense.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
