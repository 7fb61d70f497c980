// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::kv::{FileKvStore, MemoryKvStore};
use chrono::{DateTime, Utc};
use tempfile::TempDir;
use yard_core::forms::{DepartureForm, RegistrationForm, SpotAssignmentForm, SpotReleaseForm};
use yard_core::{BusId, Gate, Spot, Yard};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn check_in(plate: &str) -> RegistrationForm {
    RegistrationForm {
        bus_plate: Some(plate.to_string()),
        bus_no: Some("12".into()),
        flight_no: Some("SV12".into()),
        pax_count: Some(33),
        dep_time: Some("2026-06-01T18:30".into()),
        ..Default::default()
    }
}

/// A yard with `n` buses spread over every lifecycle stage
fn populated(n: usize) -> Yard {
    let mut yard = Yard::default();
    for i in 0..n {
        let (id, _) = yard
            .register(BusId::new(format!("bus-{i}")), check_in(&format!("P{i}")), now())
            .unwrap();
        if i % 4 == 0 {
            continue;
        }
        let lounge = SpotAssignmentForm {
            park_no: Some(Spot::new(i as u16 + 1).unwrap()),
            gate_no: Some(Gate::ALL[i % 10]),
            t3_call: Some("yes".into()),
            ..Default::default()
        };
        yard.assign_spot(&id, lounge, now()).unwrap();
        if i % 4 == 1 {
            continue;
        }
        yard.release_spot(&id, SpotReleaseForm::default(), now())
            .unwrap();
        if i % 4 == 2 {
            continue;
        }
        yard.depart(&id, DepartureForm::default(), now()).unwrap();
    }
    yard.tick(now());
    yard
}

#[test]
fn save_then_load_is_deep_equal() {
    for n in [0, 1, 9] {
        let store = StateStore::new(MemoryKvStore::new());
        let snapshot = populated(n).snapshot();
        store.save_snapshot(&snapshot).unwrap();
        assert_eq!(store.load_snapshot(), snapshot, "n = {n}");
    }
}

#[test]
fn file_backed_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(FileKvStore::open(dir.path()).unwrap());
    let snapshot = populated(5).snapshot();
    store.save_snapshot(&snapshot).unwrap();

    let reopened = StateStore::new(FileKvStore::open(dir.path()).unwrap());
    assert_eq!(reopened.load_snapshot(), snapshot);
}

#[test]
fn missing_blobs_give_defaults() {
    let store = StateStore::new(MemoryKvStore::new());
    assert_eq!(store.load_snapshot(), Snapshot::default());
    assert_eq!(store.load_settings(), Settings::default());
}

#[test]
fn corrupt_blob_gives_an_empty_registry() {
    let kv = MemoryKvStore::new();
    kv.set(SNAPSHOT_KEY, "{not json").unwrap();
    assert_eq!(StateStore::new(kv.clone()).load_snapshot(), Snapshot::default());
    kv.set(SNAPSHOT_KEY, "[1, 2, 3]").unwrap();
    assert_eq!(StateStore::new(kv).load_snapshot(), Snapshot::default());
}

#[test]
fn malformed_entries_are_skipped_individually() {
    let kv = MemoryKvStore::new();
    kv.set(
        SNAPSHOT_KEY,
        r#"{
            "busData": [
                {"id": 1, "plate": "GOOD", "arrival": "2026-06-01T08:00:00Z", "spot": 4},
                {"plate": "NO-ID"},
                "junk"
            ],
            "departedBuses": {"oops": true}
        }"#,
    )
    .unwrap();
    let snapshot = StateStore::new(kv).load_snapshot();
    assert_eq!(snapshot.bus_data.len(), 1);
    assert_eq!(snapshot.bus_data[0].plate, "GOOD");
    assert!(snapshot.departed_buses.is_empty());
    assert_eq!(snapshot.daily_stats, None);
}

#[test]
fn settings_round_trip_and_reject_bad_thresholds() {
    let kv = MemoryKvStore::new();
    let store = StateStore::new(kv.clone());
    let mut settings = Settings::default();
    settings.thresholds = Thresholds::new(6.0, 2.5).unwrap();
    settings.settings.sound = true;
    store.save_settings(&settings).unwrap();
    assert_eq!(store.load_settings(), settings);

    kv.set(SETTINGS_KEY, r#"{"thresholds": {"early": -1, "late": 3}}"#)
        .unwrap();
    assert_eq!(store.load_settings().thresholds, Thresholds::default());
}
