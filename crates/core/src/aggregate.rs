// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daily counters, taken once per bus at check-in

use crate::bus::Bus;
use crate::status::StatusClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Check-in snapshot counters. Never re-derived from live statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyAggregate {
    pub buses: u32,
    pub pax: u64,
    pub early: u32,
    pub ontime: u32,
    pub late: u32,
    /// Unique non-empty flight codes
    pub flights: BTreeSet<String>,
}

impl DailyAggregate {
    /// Count a newly registered bus under its check-in status
    pub fn record(&mut self, bus: &Bus, class: StatusClass) {
        self.buses += 1;
        self.pax += u64::from(bus.pax);
        let flight = bus.flight.trim();
        if !flight.is_empty() {
            self.flights.insert(flight.to_string());
        }
        match class {
            StatusClass::Early => self.early += 1,
            StatusClass::OnTime => self.ontime += 1,
            StatusClass::Late => self.late += 1,
        }
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }
}
