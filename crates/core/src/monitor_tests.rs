// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::forms::RegistrationForm;
use crate::id::BusId;
use chrono::TimeDelta;

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Bus departing at t0 + 9h
fn bus() -> Bus {
    let departure = (t0() + TimeDelta::hours(9)).to_rfc3339();
    Bus::from_registration(
        BusId::new("b1"),
        RegistrationForm {
            bus_plate: Some("ABC-1".into()),
            dep_time: Some(departure),
            ..Default::default()
        },
        t0(),
    )
    .unwrap()
}

fn at_hours_left(hours_left: f64) -> DateTime<Utc> {
    let elapsed = ((9.0 - hours_left) * 3600.0) as i64;
    t0() + TimeDelta::seconds(elapsed)
}

#[test]
fn first_observation_seeds_the_cache_silently() {
    let mut bus = bus();
    let fired = evaluate(&mut bus, at_hours_left(0.5), &Thresholds::default());
    assert!(fired.is_empty());
    assert_eq!(bus.previous_status, Some(StatusClass::Late));
    assert_eq!(bus.previous_hours, Some(0.5));
}

#[test]
fn full_descent_fires_info_warning_critical_once_each() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    let mut kinds = Vec::new();
    for hours_left in [9.0, 5.0, 2.0, 0.5, 0.5] {
        for t in evaluate(&mut bus, at_hours_left(hours_left), &thresholds) {
            kinds.push(t.alert_kind());
        }
    }
    assert_eq!(
        kinds,
        vec![AlertKind::Info, AlertKind::Warning, AlertKind::Critical]
    );
}

#[test]
fn critical_fires_without_a_class_change() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    evaluate(&mut bus, at_hours_left(2.0), &thresholds);
    assert_eq!(bus.previous_status, Some(StatusClass::Late));
    let fired = evaluate(&mut bus, at_hours_left(0.9), &thresholds);
    assert_eq!(fired, vec![Transition::CriticallyLate]);
}

#[test]
fn jumping_straight_from_on_time_to_critical_fires_both() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    evaluate(&mut bus, at_hours_left(4.0), &thresholds);
    let fired = evaluate(&mut bus, at_hours_left(0.5), &thresholds);
    assert_eq!(fired, vec![Transition::NowLate, Transition::CriticallyLate]);
}

#[test]
fn skipping_on_time_fires_nothing_for_the_class_change() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    evaluate(&mut bus, at_hours_left(8.0), &thresholds);
    let fired = evaluate(&mut bus, at_hours_left(2.0), &thresholds);
    assert!(fired.is_empty());
}

#[test]
fn backwards_clock_is_an_independent_comparison() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    evaluate(&mut bus, at_hours_left(2.0), &thresholds);
    // Clock jumps back to on time, then forward again
    assert!(evaluate(&mut bus, at_hours_left(5.0), &thresholds).is_empty());
    assert_eq!(
        evaluate(&mut bus, at_hours_left(2.0), &thresholds),
        vec![Transition::NowLate]
    );
}

#[test]
fn missing_departure_never_goes_critical() {
    let thresholds = Thresholds::default();
    let mut bus = bus();
    bus.departure = None;
    for _ in 0..3 {
        assert!(evaluate(&mut bus, t0(), &thresholds).is_empty());
    }
    assert_eq!(bus.previous_hours, Some(0.0));
}

#[test]
fn messages_name_the_plate() {
    assert_eq!(
        Transition::NowLate.message("XYZ"),
        "Bus XYZ exceeded scheduled departure"
    );
    assert_eq!(Transition::CriticallyLate.title(), "Critically Late Bus");
}
