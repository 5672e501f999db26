mod common;

use common::{at, fixture};
use daybook_core::{
    Collection, EventService, ExpenseService, ExportScope, NewEvent, NewExpense, NewNote,
    NewTask, NoteService, StoreError, SummaryService, TaskService,
};
use serde_json::json;

fn due(title: &str, date: &str) -> NewTask {
    NewTask {
        due_date: Some(date.to_string()),
        ..NewTask::new(title)
    }
}

#[test]
fn daily_summary_renders_counts_and_totals() {
    let fx = fixture();
    let tasks = TaskService::new(&fx.store, &fx.clock);
    tasks.create(due("today one", "today")).unwrap();
    tasks.create(due("today two", "today")).unwrap();
    tasks.create(due("late", "2025-10-02")).unwrap();
    let finished = tasks.create(due("done", "2025-10-01")).unwrap();
    tasks.complete(finished.id).unwrap();

    EventService::new(&fx.store, &fx.clock)
        .create(NewEvent::new("sync", "2025-10-06T15:00:00Z"))
        .unwrap();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);
    expenses
        .log(NewExpense::new(45.99, "Office Supplies", "paper"))
        .unwrap();
    expenses
        .log(NewExpense::new(125.00, "Software", "license"))
        .unwrap();

    let summary = SummaryService::new(&fx.store, &fx.clock).daily_summary(None);
    assert_eq!(
        summary,
        "📊 Daily Summary for 2025-10-06\n\n\
         📋 Tasks: 2 due today (1 overdue)\n\
         📅 Events: 1\n\
         💰 Expenses: $170.99\n\
         ✅ Completed: 1 tasks\n"
    );
}

#[test]
fn daily_summary_omits_overdue_clause_when_nothing_is_late() {
    let fx = fixture();
    let summary = SummaryService::new(&fx.store, &fx.clock).daily_summary(Some("tomorrow"));
    assert_eq!(
        summary,
        "📊 Daily Summary for 2025-10-07\n\n\
         📋 Tasks: 0 due today\n\
         📅 Events: 0\n\
         💰 Expenses: $0.00\n\
         ✅ Completed: 0 tasks\n"
    );
}

#[test]
fn completed_count_uses_completion_date() {
    let fx = fixture();
    let tasks = TaskService::new(&fx.store, &fx.clock);
    let yesterday = tasks.create(NewTask::new("yesterday")).unwrap();
    fx.clock.set(at(2025, 10, 5, 22, 0));
    tasks.complete(yesterday.id).unwrap();
    fx.clock.set(at(2025, 10, 6, 9, 30));
    let today = tasks.create(NewTask::new("today")).unwrap();
    tasks.complete(today.id).unwrap();

    let summaries = SummaryService::new(&fx.store, &fx.clock);
    assert!(summaries.daily_summary(None).contains("✅ Completed: 1 tasks"));
    assert!(summaries
        .daily_summary(Some("2025-10-05"))
        .contains("✅ Completed: 1 tasks"));
}

#[test]
fn today_schedule_combines_events_and_due_tasks() {
    let fx = fixture();
    let tasks = TaskService::new(&fx.store, &fx.clock);
    tasks.create(due("file report", "today")).unwrap();
    tasks.create(due("later", "next week")).unwrap();
    let events = EventService::new(&fx.store, &fx.clock);
    events
        .create(NewEvent::new("lunch", "2025-10-06T12:00:00Z"))
        .unwrap();
    events
        .create(NewEvent::new("offsite", "2025-10-09T12:00:00Z"))
        .unwrap();

    let schedule = SummaryService::new(&fx.store, &fx.clock).today_schedule();
    assert_eq!(schedule.events.len(), 1);
    assert_eq!(schedule.events[0].title, "lunch");
    assert_eq!(schedule.tasks.len(), 1);
    assert_eq!(schedule.tasks[0].title, "file report");
}

#[test]
fn export_returns_raw_documents() {
    let fx = fixture();
    NoteService::new(&fx.store, &fx.clock)
        .create(NewNote::new("Demo", "draft"))
        .unwrap();
    let summaries = SummaryService::new(&fx.store, &fx.clock);

    let notes = summaries.export(ExportScope::One(Collection::Notes));
    assert_eq!(notes[0]["title"], json!("Demo"));

    let all = summaries.export_all("all").unwrap();
    let keys: Vec<&String> = all.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["events", "expenses", "notes", "reminders", "tasks"]
    );
    assert_eq!(all["tasks"], json!([]));
    assert_eq!(all["notes"], notes);
}

#[test]
fn export_of_unknown_kind_is_rejected() {
    let fx = fixture();
    let err = SummaryService::new(&fx.store, &fx.clock)
        .export_all("invoices")
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownCollection(ref kind) if kind == "invoices"));
}
