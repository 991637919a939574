mod common;

use std::collections::HashSet;

use chrono::Duration;
use finance_core::config::ProjectionSettings;
use finance_core::projection::{
    project_account, Account, PostedTransaction, ProjectionWindow, RecurringObligation, SourceKind,
};
use finance_core::schedule::{Frequency, RecurrenceRule};
use rust_decimal_macros::dec;
use serde_json::Value;
use uuid::Uuid;

fn monthly_on(day: u32) -> RecurrenceRule {
    RecurrenceRule::new(Frequency::Monthly, 1, common::at(2024, 1, 1)).on_day(day)
}

/// One of each obligation kind, all monthly, netting +715.25 per month.
fn household() -> Vec<RecurringObligation> {
    vec![
        RecurringObligation::payroll("Salary", dec!(3000), dec!(2400), monthly_on(1)),
        RecurringObligation::expense("Rent", dec!(1200), monthly_on(3)),
        RecurringObligation::transfer_out("Savings sweep", dec!(200), monthly_on(5)),
        RecurringObligation::loan_payment("Car loan", dec!(310.50), monthly_on(10)),
        RecurringObligation::income("Dividends", dec!(25.75), monthly_on(20)),
    ]
}

fn summer_window() -> ProjectionWindow {
    ProjectionWindow::new(common::at(2024, 6, 1), common::at_time(2024, 7, 31, 23, 59))
        .expect("window")
}

#[test]
fn two_month_household_projection_walks_every_kind() {
    let account = Account::new("Checking", dec!(2500));
    let timeline =
        project_account(&account, &household(), &[], &summer_window()).expect("project");

    assert_eq!(timeline.len(), 10, "five obligations over two months");
    assert!(timeline.iter().all(|entry| !entry.is_posted()));
    assert!(timeline.iter().all(|entry| summer_window().contains(entry.date)));
    assert!(timeline.windows(2).all(|pair| pair[0].date <= pair[1].date));

    let kinds: HashSet<SourceKind> = timeline.iter().map(|entry| entry.kind).collect();
    assert_eq!(kinds.len(), 5);

    assert_eq!(timeline[0].title, "Salary");
    assert_eq!(timeline[0].balance, Some(dec!(4900)));
    assert_eq!(
        timeline.last().and_then(|entry| entry.balance),
        Some(dec!(3930.50))
    );
}

#[test]
fn posted_history_shifts_every_later_balance() {
    let account = Account::new("Checking", dec!(2500));
    let correction = PostedTransaction::new(
        Uuid::new_v4(),
        SourceKind::Expense,
        "Bank fee",
        common::at(2024, 6, 2),
        dec!(-50),
    );
    let timeline = project_account(&account, &household(), &[correction], &summer_window())
        .expect("project");

    assert_eq!(timeline.len(), 11);
    assert!(timeline[1].is_posted());
    assert_eq!(timeline[1].balance, Some(dec!(4850)));
    assert_eq!(
        timeline.last().and_then(|entry| entry.balance),
        Some(dec!(3880.50))
    );
}

#[test]
fn settings_build_the_standard_window() {
    let settings = ProjectionSettings::default();
    let window = settings.window_from(*common::REFERENCE);
    assert_eq!(window, ProjectionWindow::horizon(*common::REFERENCE, 5));
    assert!(window.contains(*common::REFERENCE));
    assert_eq!(window.end - window.start, Duration::days(365 * 5));
}

#[test]
fn timeline_serializes_like_the_api_payload() {
    let account = Account::new("Checking", dec!(2500));
    let timeline =
        project_account(&account, &household(), &[], &summer_window()).expect("project");
    let value = serde_json::to_value(&timeline[0]).expect("serialize");

    assert_eq!(value["kind"], Value::String("payroll".into()));
    assert_eq!(value["title"], Value::String("Salary".into()));
    assert!(value.get("balance").is_some());
    assert!(value.get("source_id").is_some());
    // Projected entries omit the history-only fields entirely.
    assert!(value.get("transaction_id").is_none());
    assert!(value.get("date_modified").is_none());
    assert!(value.get("description").is_none());
}
