// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeDelta;
use yare::parameterized;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn departure_in(minutes: i64) -> String {
    (t0() + TimeDelta::minutes(minutes)).to_rfc3339()
}

#[parameterized(
    eight_hours_is_early = { 8 * 60, StatusClass::Early },
    five_hours_is_on_time = { 5 * 60, StatusClass::OnTime },
    one_hour_is_late = { 60, StatusClass::Late },
    overdue_is_late = { -60, StatusClass::Late },
    exactly_early_threshold_is_on_time = { 7 * 60, StatusClass::OnTime },
    exactly_late_threshold_is_on_time = { 3 * 60, StatusClass::OnTime },
    just_past_early_threshold_is_early = { 7 * 60 + 1, StatusClass::Early },
    just_under_late_threshold_is_late = { 3 * 60 - 1, StatusClass::Late },
)]
fn classify_against_default_thresholds(minutes: i64, expected: StatusClass) {
    let departure = departure_in(minutes);
    let status = classify(t0(), Some(&departure), &Thresholds::default());
    assert_eq!(status.class, expected);
    assert!((status.hours - minutes as f64 / 60.0).abs() < 1e-9);
}

#[parameterized(
    missing = { None },
    empty = { Some("") },
    garbage = { Some("not a date") },
    half_a_date = { Some("2026-13-45") },
)]
fn invalid_departure_falls_back_to_late_zero(departure: Option<&str>) {
    let status = classify(t0(), departure, &Thresholds::default());
    assert_eq!(status, Status::INVALID);
    assert_eq!(status.class, StatusClass::Late);
    assert_eq!(status.hours, 0.0);
}

#[test]
fn non_finite_difference_is_invalid() {
    let thresholds = Thresholds::default();
    assert_eq!(thresholds.classify_hours(f64::NAN), Status::INVALID);
    assert_eq!(thresholds.classify_hours(f64::INFINITY), Status::INVALID);
}

#[test]
fn classification_follows_the_callers_now() {
    let departure = departure_in(8 * 60);
    let thresholds = Thresholds::default();
    assert_eq!(
        classify(t0(), Some(&departure), &thresholds).class,
        StatusClass::Early
    );
    let later = t0() + TimeDelta::hours(4);
    assert_eq!(
        classify(later, Some(&departure), &thresholds).class,
        StatusClass::OnTime
    );
}

#[test]
fn parse_accepts_offsets_and_naive_local_values() {
    let with_offset = parse_timestamp("2026-06-01T15:00:00+03:00").unwrap();
    assert_eq!(with_offset, t0());

    let naive = parse_timestamp("2026-06-01T12:00").unwrap();
    let expected = Local
        .from_local_datetime(
            &NaiveDateTime::parse_from_str("2026-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
        )
        .earliest()
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(naive, expected);
}

#[test]
fn thresholds_reject_non_finite_or_negative_values() {
    assert!(Thresholds::new(f64::NAN, 3.0).is_err());
    assert!(Thresholds::new(7.0, -1.0).is_err());
    // Inverted thresholds are tolerated
    let inverted = Thresholds::new(2.0, 5.0).unwrap();
    assert_eq!(inverted.classify_hours(4.0).class, StatusClass::Late);
}

#[test]
fn status_class_uses_lowercase_wire_names() {
    assert_eq!(
        serde_json::to_string(&StatusClass::OnTime).unwrap(),
        "\"ontime\""
    );
    let parsed: StatusClass = serde_json::from_str("\"early\"").unwrap();
    assert_eq!(parsed, StatusClass::Early);
}

#[test]
fn countdown_formats_remaining_time() {
    let departure = (t0() + TimeDelta::seconds(26 * 3600 + 5 * 60 + 9)).to_rfc3339();
    let countdown = Countdown::until(t0(), Some(&departure));
    assert_eq!(countdown.to_string(), "26:05:09");
}

#[test]
fn countdown_reports_overdue_and_unknown() {
    let past = departure_in(-1);
    assert_eq!(Countdown::until(t0(), Some(&past)), Countdown::Overdue);
    let now = departure_in(0);
    assert_eq!(Countdown::until(t0(), Some(&now)), Countdown::Overdue);
    assert_eq!(Countdown::until(t0(), None).to_string(), "--:--:--");
}
