// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shape of the persisted `BUS_DATA` blob

use crate::aggregate::DailyAggregate;
use crate::bus::Bus;
use serde::{Deserialize, Serialize};

/// Storage key of the registry snapshot
pub const SNAPSHOT_KEY: &str = "BUS_DATA";
/// Storage key of the operator settings
pub const SETTINGS_KEY: &str = "LOCC_Settings";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub bus_data: Vec<Bus>,
    /// Newest first
    #[serde(default)]
    pub departed_buses: Vec<Bus>,
    /// Absent in older blobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_stats: Option<DailyAggregate>,
}
