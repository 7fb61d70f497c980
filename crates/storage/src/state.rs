// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerant load/save of the registry snapshot and operator settings
//!
//! Loading never fails. An absent blob, a blob that is not JSON, or a
//! bus entry that does not decode falls back to defaults (or is skipped)
//! with a warning, so bad state can never block startup.

use crate::kv::{KvStore, StorageError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use yard_core::settings::Settings;
use yard_core::snapshot::{Snapshot, SETTINGS_KEY, SNAPSHOT_KEY};
use yard_core::status::Thresholds;
use yard_core::Bus;

#[derive(Debug, Clone)]
pub struct StateStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> StateStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    fn load_value(&self, key: &str) -> Option<Value> {
        let text = match self.kv.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key, "no stored blob");
                return None;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read blob, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored blob is not valid JSON, using defaults");
                None
            }
        }
    }

    fn save_value<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.kv.set(key, &text).inspect_err(|e| {
            tracing::error!(key, error = %e, "failed to write blob");
        })
    }

    /// Load the registry snapshot, skipping entries that do not decode
    pub fn load_snapshot(&self) -> Snapshot {
        let Some(value) = self.load_value(SNAPSHOT_KEY) else {
            return Snapshot::default();
        };
        let Value::Object(mut blob) = value else {
            tracing::warn!(key = SNAPSHOT_KEY, "stored snapshot is not an object, using defaults");
            return Snapshot::default();
        };
        let snapshot = Snapshot {
            bus_data: decode_buses(blob.remove("busData"), "busData"),
            departed_buses: decode_buses(blob.remove("departedBuses"), "departedBuses"),
            daily_stats: blob.remove("dailyStats").and_then(decode_or_warn),
        };
        tracing::debug!(
            active = snapshot.bus_data.len(),
            departed = snapshot.departed_buses.len(),
            "snapshot loaded"
        );
        snapshot
    }

    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        self.save_value(SNAPSHOT_KEY, snapshot)
    }

    /// Load operator settings; unusable thresholds fall back to defaults
    pub fn load_settings(&self) -> Settings {
        let Some(value) = self.load_value(SETTINGS_KEY) else {
            return Settings::default();
        };
        let Some(mut settings) = decode_or_warn::<Settings>(value) else {
            return Settings::default();
        };
        let Thresholds { early, late } = settings.thresholds;
        if let Err(e) = Thresholds::new(early, late) {
            tracing::warn!(error = %e, "stored thresholds rejected, using defaults");
            settings.thresholds = Thresholds::default();
        }
        settings
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.save_value(SETTINGS_KEY, settings)
    }
}

fn decode_or_warn<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value)
        .inspect_err(|e| tracing::warn!(error = %e, "ignoring undecodable stored value"))
        .ok()
}

fn decode_buses(value: Option<Value>, field: &str) -> Vec<Bus> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => {
            let total = entries.len();
            let buses: Vec<Bus> = entries
                .into_iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    serde_json::from_value(entry)
                        .inspect_err(|e| {
                            tracing::warn!(field, index, error = %e, "skipping malformed bus entry")
                        })
                        .ok()
                })
                .collect();
            if buses.len() < total {
                tracing::warn!(
                    field,
                    skipped = total - buses.len(),
                    "some bus entries were skipped"
                );
            }
            buses
        }
        Some(_) => {
            tracing::warn!(field, "expected a list of buses, ignoring");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
