//! Integration tests for core model types.

use chrono::NaiveDate;
use shopdesk_core::{
    AttemptOutcome, Credential, DateWindow, DiagnosticTrail, TimestampEncoding, TrailEntry,
    parse_request_date,
};

#[test]
fn test_request_date_to_window() {
    let date = parse_request_date("2024-02-29").unwrap();
    let window = DateWindow::platform_day(date).unwrap();

    assert_eq!(window.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(
        window.start_text(TimestampEncoding::LocalSpace),
        "2024-02-29 00:00:00"
    );
}

#[test]
fn test_trail_day_filter() {
    let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let mut trail = DiagnosticTrail::new();
    trail.push(
        TrailEntry::new("a", Some(500), serde_json::Value::Null, AttemptOutcome::Failed)
            .on_day(Some(d1)),
    );
    trail.push(
        TrailEntry::new("b", Some(200), serde_json::Value::Null, AttemptOutcome::Succeeded)
            .on_day(Some(d2)),
    );

    assert_eq!(trail.for_day(d1).count(), 1);
    assert_eq!(trail.for_day(d2).next().unwrap().name, "b");
}

#[test]
fn test_credential_validation() {
    let credential = Credential::new("app-id", "$2a$04$abcdefghijklmnopqrstuu");
    assert!(credential.validate().is_ok());
}
