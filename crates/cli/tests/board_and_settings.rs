// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for the board, statistics, settings and ticks

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::Yard;
use predicates::prelude::*;
use similar_asserts::assert_eq;

#[test]
fn board_counts_live_status_and_occupancy() {
    let yard = Yard::new();
    yard.register("EARLY", 9);
    yard.register("ONTIME", 5);
    yard.register("LATE", 1);
    yard.cmd()
        .args(["assign", "EARLY", "--spot", "1", "--gate", "A1"])
        .assert()
        .success();

    let board = yard.json(&["board"]);
    assert_eq!(board["total"], 3);
    assert_eq!(
        (&board["early"], &board["ontime"], &board["late"]),
        (&serde_json::json!(1), &serde_json::json!(1), &serde_json::json!(1))
    );
    assert_eq!(board["pax"], 120);
    assert_eq!(board["flights"], 1);
    assert_eq!(board["parked"], 1);
    assert_eq!(board["freeSpots"], 86);
    assert_eq!(board["occupancyPct"], 1);
    assert_eq!(board["onTimeRatePct"], 67);
    assert_eq!(board["gates"].as_array().unwrap().len(), 10);

    yard.cmd()
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("Occupancy: 1%"));
}

#[test]
fn stats_are_check_in_snapshots() {
    let yard = Yard::new();
    yard.register("A-1", 9);
    yard.register("B-2", 1);

    let stats = yard.json(&["stats"]);
    assert_eq!(stats["buses"], 2);
    assert_eq!(stats["pax"], 80);
    assert_eq!(stats["early"], 1);
    assert_eq!(stats["late"], 1);
    assert_eq!(stats["flightCount"], 1);
}

#[test]
fn thresholds_round_trip_and_validate() {
    let yard = Yard::new();
    assert_eq!(
        yard.json(&["thresholds", "show"]),
        serde_json::json!({"early": 7.0, "late": 3.0})
    );

    yard.cmd()
        .args(["thresholds", "set", "6", "2.5"])
        .assert()
        .success();
    assert_eq!(
        yard.json(&["thresholds", "show"]),
        serde_json::json!({"early": 6.0, "late": 2.5})
    );

    yard.cmd()
        .args(["thresholds", "set", "NaN", "2"])
        .assert()
        .failure();
    assert_eq!(yard.json(&["thresholds", "show"])["early"], 6.0);
}

#[test]
fn toggles_persist() {
    let yard = Yard::new();
    yard.cmd()
        .args(["settings", "toggle", "sound"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sound: Enabled"));

    let settings = yard.json(&["settings", "show"]);
    assert_eq!(settings["settings"]["sound"], true);
    assert_eq!(settings["settings"]["notif"], true);
    assert_eq!(settings["spotSize"], 80);

    yard.cmd()
        .args(["settings", "toggle", "volume"])
        .assert()
        .failure();
}

#[test]
fn first_tick_only_seeds_the_monitor() {
    let yard = Yard::new();
    yard.register("A-1", 9);

    yard.cmd()
        .arg("tick")
        .assert()
        .success()
        .stdout(predicate::str::contains("No alerts"));
    assert_eq!(yard.json(&["tick"]), serde_json::json!([]));
}

#[test]
fn corrupt_state_starts_empty() {
    let yard = Yard::new();
    std::fs::write(yard.dir.path().join("BUS_DATA.json"), "{not json").unwrap();
    std::fs::write(yard.dir.path().join("LOCC_Settings.json"), "[]").unwrap();

    assert_eq!(yard.json(&["list", "registered"]), serde_json::json!([]));
    assert_eq!(yard.json(&["thresholds", "show"])["early"], 7.0);
    yard.register("A-1", 9);
    assert_eq!(yard.json(&["stats"])["buses"], 1);
}

#[test]
fn state_dir_can_come_from_the_environment() {
    let yard = Yard::new();
    let mut cmd = assert_cmd::Command::cargo_bin("yard").unwrap();
    cmd.env("YARD_STATE_DIR", yard.dir.path())
        .env("RUST_LOG", "warn")
        .args(["register", "--plate", "ENV-1"])
        .assert()
        .success();

    assert_eq!(yard.json(&["show", "ENV-1"])["plate"], "ENV-1");
}

#[test]
fn seed_parks_a_demo_fleet_once() {
    let yard = Yard::new();
    yard.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 20 demo buses"));

    let board = yard.json(&["board"]);
    assert_eq!(board["total"], 20);
    assert_eq!(board["parked"], 20);
    let stats = yard.json(&["stats"]);
    assert_eq!(
        (&stats["late"], &stats["ontime"], &stats["early"]),
        (&serde_json::json!(10), &serde_json::json!(5), &serde_json::json!(5))
    );

    yard.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing seeded"));
    assert_eq!(yard.json(&["board"])["total"], 20);
}
