mod common;

use common::fixture;
use daybook_core::{Collection, ExpenseQuery, ExpenseService, NewExpense, StoreError};

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

fn dated(amount: f64, category: &str, date: &str) -> NewExpense {
    NewExpense {
        date: Some(date.to_string()),
        ..NewExpense::new(amount, category, format!("{category} purchase"))
    }
}

#[test]
fn log_defaults_date_to_today_and_normalizes_given_date() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);

    let undated = expenses
        .log(NewExpense::new(12.5, "Meals", "lunch"))
        .unwrap();
    assert_eq!(undated.date, "2025-10-06");
    assert_eq!(undated.payment_method, None);

    let yesterday_style = expenses
        .log(NewExpense {
            payment_method: Some("card".to_string()),
            ..dated(3.0, "Transit", "10/01/2025")
        })
        .unwrap();
    assert_eq!(yesterday_style.date, "2025-10-01");
    assert_eq!(yesterday_style.id, 2);
    assert_eq!(yesterday_style.payment_method.as_deref(), Some("card"));
}

#[test]
fn summary_totals_same_day_purchases_by_category() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);
    expenses
        .log(NewExpense::new(45.99, "Office Supplies", "printer paper"))
        .unwrap();
    expenses
        .log(NewExpense::new(125.00, "Software", "license"))
        .unwrap();

    let summary = expenses.summarize(&ExpenseQuery::default());
    assert!(close(summary.total, 170.99));
    assert_eq!(summary.by_category.len(), 2);
    assert!(close(summary.by_category["Office Supplies"], 45.99));
    assert!(close(summary.by_category["Software"], 125.00));
    assert_eq!(summary.expenses.len(), 2);
}

#[test]
fn summary_filters_by_inclusive_dates_and_category() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);
    expenses.log(dated(10.0, "Meals", "2025-10-01")).unwrap();
    expenses.log(dated(20.0, "Meals", "2025-10-05")).unwrap();
    expenses.log(dated(40.0, "Travel", "2025-10-05")).unwrap();
    expenses.log(dated(80.0, "Meals", "2025-10-09")).unwrap();

    let window = expenses.summarize(&ExpenseQuery {
        start_date: Some("2025-10-01".to_string()),
        end_date: Some("2025-10-05".to_string()),
        category: None,
    });
    assert!(close(window.total, 70.0));

    let meals = expenses.summarize(&ExpenseQuery {
        start_date: Some("October 2, 2025".to_string()),
        end_date: None,
        category: Some("Meals".to_string()),
    });
    assert!(close(meals.total, 100.0));
    assert_eq!(meals.by_category.keys().collect::<Vec<_>>(), vec!["Meals"]);

    let empty = expenses.summarize(&ExpenseQuery {
        category: Some("meals".to_string()),
        ..ExpenseQuery::default()
    });
    assert!(close(empty.total, 0.0));
    assert!(empty.by_category.is_empty());
    assert!(empty.expenses.is_empty());
}

#[test]
fn list_categories_is_sorted_and_distinct() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);
    assert!(expenses.list_categories().is_empty());

    expenses.log(NewExpense::new(1.0, "Travel", "bus")).unwrap();
    expenses.log(NewExpense::new(2.0, "Meals", "tea")).unwrap();
    expenses.log(NewExpense::new(3.0, "Travel", "taxi")).unwrap();

    assert_eq!(expenses.list_categories(), vec!["Meals", "Travel"]);
}

#[test]
fn non_finite_amounts_are_rejected_before_writing() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);

    for amount in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let err = expenses
            .log(NewExpense::new(amount, "Broken", "bad input"))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidAmount(_)));
    }
    assert!(!fx.document(Collection::Expenses).exists());
}

#[test]
fn huge_totals_saturate_at_max_finite_value() {
    let fx = fixture();
    let expenses = ExpenseService::new(&fx.store, &fx.clock);
    expenses.log(NewExpense::new(1e308, "Capex", "fab")).unwrap();
    expenses.log(NewExpense::new(1e308, "Capex", "fab two")).unwrap();

    let summary = expenses.summarize(&ExpenseQuery::default());
    assert_eq!(summary.total, f64::MAX);
    assert_eq!(summary.by_category["Capex"], f64::MAX);
    assert_eq!(expenses.summarize(&ExpenseQuery::default()).expenses.len(), 2);
}
