// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{Duration, Local};
use serde_json::Value;
use tempfile::TempDir;

/// A scratch state directory plus helpers to run `yard` against it
pub struct Yard {
    pub dir: TempDir,
}

impl Yard {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// `yard --state-dir <tmp> ...` with a quiet log filter
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("yard").expect("yard binary");
        cmd.arg("--state-dir")
            .arg(self.dir.path())
            .env("RUST_LOG", "warn")
            .env_remove("YARD_STATE_DIR");
        cmd
    }

    /// Run with `--format json` and parse stdout
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .output()
            .expect("run yard");
        assert!(
            output.status.success(),
            "yard {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }

    /// Register a bus departing `hours` from now; returns its id
    pub fn register(&self, plate: &str, hours: i64) -> String {
        let departure = departure_in(hours);
        let reply = self.json(&[
            "register",
            "--plate",
            plate,
            "--flight",
            "SV1001",
            "--pax",
            "40",
            "--visa",
            "Umrah",
            "--departure",
            &departure,
        ]);
        reply["id"].as_str().expect("id in reply").to_string()
    }
}

/// Local wall-clock `YYYY-MM-DDTHH:MM`, the format operators type
pub fn departure_in(hours: i64) -> String {
    (Local::now() + Duration::hours(hours))
        .format("%Y-%m-%dT%H:%M")
        .to_string()
}
