//! Cross-collection read views.
//!
//! # Responsibility
//! - Compose today's schedule from events and the task agenda.
//! - Render the daily digest text.
//! - Export raw collection documents.
//!
//! # Invariants
//! - This service only reads; it never saves a collection.
//! - Collections are joined by date-string equality only.
//!
//! # See also
//! - `service::task_service` for agenda bucketing.
//! - `tools::reports` for the tool wrappers.

use crate::model::event::CalendarEvent;
use crate::model::expense::ExpenseQuery;
use crate::model::task::Task;
use crate::repo::json_store::{Collection, CollectionRepository, StoreError, StoreResult};
use crate::service::event_service::EventService;
use crate::service::expense_service::ExpenseService;
use crate::service::task_service::TaskService;
use crate::time::clock::Clock;
use crate::time::dates::{normalize_date, timestamp_on_date, today};
use serde::Serialize;
use serde_json::{Map, Value};

/// Events and due tasks for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodaySchedule {
    pub events: Vec<CalendarEvent>,
    pub tasks: Vec<Task>,
}

/// What an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    One(Collection),
    All,
}

impl ExportScope {
    /// Parses `all` or a collection name.
    ///
    /// # Errors
    /// - Returns `StoreError::UnknownCollection` for any other value.
    pub fn parse(value: &str) -> StoreResult<Self> {
        if value == "all" {
            return Ok(Self::All);
        }
        Collection::parse(value)
            .map(Self::One)
            .ok_or_else(|| StoreError::UnknownCollection(value.to_string()))
    }
}

/// Read-only aggregation over all collections.
pub struct SummaryService<'a, R: CollectionRepository> {
    repo: &'a R,
    clock: &'a dyn Clock,
}

impl<'a, R: CollectionRepository> SummaryService<'a, R> {
    pub fn new(repo: &'a R, clock: &'a dyn Clock) -> Self {
        Self { repo, clock }
    }

    /// Today's events plus the tasks due today.
    pub fn today_schedule(&self) -> TodaySchedule {
        let date = today(self.clock.now());
        TodaySchedule {
            events: self.events().today_events(),
            tasks: self.tasks().daily_agenda(Some(&date)).tasks,
        }
    }

    /// Renders the digest for `date` (default today).
    ///
    /// Format:
    /// ```text
    /// 📊 Daily Summary for 2025-10-06
    ///
    /// 📋 Tasks: 2 due today (1 overdue)
    /// 📅 Events: 1
    /// 💰 Expenses: $170.99
    /// ✅ Completed: 3 tasks
    /// ```
    /// The overdue clause only appears when something is overdue.
    pub fn daily_summary(&self, date: Option<&str>) -> String {
        let now = self.clock.now();
        let target = match date {
            Some(value) => normalize_date(value, now),
            None => today(now),
        };

        let agenda = self.tasks().daily_agenda(Some(&target));
        let expenses = self.expenses().summarize(&ExpenseQuery {
            start_date: Some(target.clone()),
            end_date: Some(target.clone()),
            category: None,
        });
        let event_count = self.events().events_on(&target).len();
        let completed_count = self
            .repo
            .load::<Task>(Collection::Tasks)
            .iter()
            .filter(|task| {
                task.completed_at
                    .as_deref()
                    .is_some_and(|stamp| timestamp_on_date(stamp, &target))
            })
            .count();

        let mut summary = format!("📊 Daily Summary for {target}\n\n");
        summary.push_str(&format!("📋 Tasks: {} due today", agenda.tasks.len()));
        if !agenda.overdue.is_empty() {
            summary.push_str(&format!(" ({} overdue)", agenda.overdue.len()));
        }
        summary.push('\n');
        summary.push_str(&format!("📅 Events: {event_count}\n"));
        summary.push_str(&format!("💰 Expenses: ${:.2}\n", expenses.total));
        summary.push_str(&format!("✅ Completed: {completed_count} tasks\n"));
        summary
    }

    /// Returns raw collection documents for export.
    ///
    /// `All` yields an object keyed by collection name.
    pub fn export(&self, scope: ExportScope) -> Value {
        match scope {
            ExportScope::One(collection) => self.repo.load_raw(collection),
            ExportScope::All => {
                let mut documents = Map::new();
                for collection in Collection::ALL {
                    documents.insert(
                        collection.as_str().to_string(),
                        self.repo.load_raw(collection),
                    );
                }
                Value::Object(documents)
            }
        }
    }

    /// Parses `kind` and exports the matching documents.
    pub fn export_all(&self, kind: &str) -> StoreResult<Value> {
        Ok(self.export(ExportScope::parse(kind)?))
    }

    fn tasks(&self) -> TaskService<'a, R> {
        TaskService::new(self.repo, self.clock)
    }

    fn events(&self) -> EventService<'a, R> {
        EventService::new(self.repo, self.clock)
    }

    fn expenses(&self) -> ExpenseService<'a, R> {
        ExpenseService::new(self.repo, self.clock)
    }
}
