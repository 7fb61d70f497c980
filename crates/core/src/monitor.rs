// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge-triggered status transition detection
//!
//! Each tick compares a bus's freshly computed status with the class and
//! hours cached on the previous tick. The cache is refreshed on every tick,
//! whether or not anything fired, so every tick is an independent
//! comparison and a clock that jumps around does not wedge the monitor.

use crate::alert::AlertKind;
use crate::bus::Bus;
use crate::status::{Status, StatusClass, Thresholds};
use chrono::{DateTime, Utc};

/// Hours left below which a late bus is critical
pub const CRITICAL_HOURS: f64 = 1.0;

/// A qualifying transition seen on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Early to on time
    NowOnTime,
    /// On time to late
    NowLate,
    /// Late and crossed under one hour left
    CriticallyLate,
}

impl Transition {
    pub fn alert_kind(&self) -> AlertKind {
        match self {
            Transition::NowOnTime => AlertKind::Info,
            Transition::NowLate => AlertKind::Warning,
            Transition::CriticallyLate => AlertKind::Critical,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Transition::NowOnTime => "Status Change",
            Transition::NowLate => "Late Bus",
            Transition::CriticallyLate => "Critically Late Bus",
        }
    }

    pub fn message(&self, plate: &str) -> String {
        match self {
            Transition::NowOnTime => format!("Bus {plate} is now on time"),
            Transition::NowLate => format!("Bus {plate} exceeded scheduled departure"),
            Transition::CriticallyLate => format!("Bus {plate} is late less than an hour"),
        }
    }
}

/// Compare `current` with the bus's cache, then refresh the cache.
///
/// The first observation only seeds the cache.
pub fn observe(bus: &mut Bus, current: Status) -> Vec<Transition> {
    let mut fired = Vec::new();
    if let Some(previous) = bus.previous_status {
        match (previous, current.class) {
            (StatusClass::Early, StatusClass::OnTime) => fired.push(Transition::NowOnTime),
            (StatusClass::OnTime, StatusClass::Late) => fired.push(Transition::NowLate),
            _ => {}
        }
        let was_clear = bus.previous_hours.is_some_and(|h| h >= CRITICAL_HOURS);
        if current.class == StatusClass::Late && current.hours < CRITICAL_HOURS && was_clear {
            fired.push(Transition::CriticallyLate);
        }
    }
    bus.previous_status = Some(current.class);
    bus.previous_hours = Some(current.hours);
    fired
}

/// Classify the bus at `now` and diff against its cache
pub fn evaluate(bus: &mut Bus, now: DateTime<Utc>, thresholds: &Thresholds) -> Vec<Transition> {
    let current = bus.status(now, thresholds);
    let fired = observe(bus, current);
    if !fired.is_empty() {
        tracing::debug!(
            bus_id = %bus.id,
            class = %current.class,
            hours = current.hours,
            ?fired,
            "status transition"
        );
    }
    fired
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
