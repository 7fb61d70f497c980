// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live board summary, recomputed on demand

use crate::bus::Bus;
use crate::forms::VisaCategory;
use crate::gate::Gate;
use crate::spot::SPOT_COUNT;
use crate::status::{StatusClass, Thresholds};
use chrono::{DateTime, Local, Timelike, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Operational shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shift {
    /// 06:00 to 13:59
    A,
    /// 14:00 to 21:59
    B,
    /// Overnight
    C,
}

impl Shift {
    pub fn at_hour(hour: u32) -> Self {
        match hour {
            6..=13 => Shift::A,
            14..=21 => Shift::B,
            _ => Shift::C,
        }
    }

    /// Shift in effect at `now`, by local wall-clock hour
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::at_hour(now.with_timezone(&Local).hour())
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shift::A => "A",
            Shift::B => "B",
            Shift::C => "C",
        })
    }
}

pub const VISA_CATEGORIES: [VisaCategory; 6] = [
    VisaCategory::Hajj,
    VisaCategory::Umrah,
    VisaCategory::Visit,
    VisaCategory::Tourism,
    VisaCategory::Gcc,
    VisaCategory::Work,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub early: u32,
    pub ontime: u32,
    pub late: u32,
}

impl ClassCounts {
    fn add(&mut self, class: StatusClass) {
        match class {
            StatusClass::Early => self.early += 1,
            StatusClass::OnTime => self.ontime += 1,
            StatusClass::Late => self.late += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.early + self.ontime + self.late
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisaSummary {
    pub visa: VisaCategory,
    pub buses: u32,
    pub pax: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateSummary {
    pub gate: Gate,
    pub buses: u32,
    #[serde(flatten)]
    pub counts: ClassCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub total: u32,
    #[serde(flatten)]
    pub counts: ClassCounts,
    pub pax: u64,
    pub flights: usize,
    pub visas: Vec<VisaSummary>,
    pub parked: usize,
    pub free_spots: usize,
    /// Parked buses as a rounded percentage of all spots
    pub occupancy_pct: u32,
    pub peak_occupancy_pct: u32,
    /// Early plus on time, as a rounded percentage of active buses
    pub on_time_rate_pct: u32,
    pub avg_pax: u32,
    pub gates: Vec<GateSummary>,
    pub shift: Shift,
}

fn rounded_pct(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Occupancy percentage for `parked` spot-holding buses
pub fn occupancy_pct(parked: usize) -> u32 {
    rounded_pct(parked, SPOT_COUNT)
}

impl BoardSummary {
    pub fn compute(
        buses: &[Bus],
        now: DateTime<Utc>,
        thresholds: &Thresholds,
        peak_occupancy_pct: u32,
    ) -> Self {
        let mut counts = ClassCounts::default();
        let mut pax = 0u64;
        let mut flights = BTreeSet::new();
        let mut visas: Vec<VisaSummary> = VISA_CATEGORIES
            .iter()
            .map(|&visa| VisaSummary {
                visa,
                buses: 0,
                pax: 0,
            })
            .collect();
        let mut gates: Vec<GateSummary> = Gate::ALL
            .iter()
            .map(|&gate| GateSummary {
                gate,
                buses: 0,
                counts: ClassCounts::default(),
            })
            .collect();

        for bus in buses {
            let class = bus.status(now, thresholds).class;
            counts.add(class);
            pax += u64::from(bus.pax);
            if !bus.flight.trim().is_empty() {
                flights.insert(bus.flight.trim());
            }
            if let Some(entry) = bus
                .visa
                .and_then(|v| visas.iter_mut().find(|s| s.visa == v))
            {
                entry.buses += 1;
                entry.pax += u64::from(bus.pax);
            }
            if let Some(entry) = bus
                .gate
                .and_then(|g| gates.iter_mut().find(|s| s.gate == g))
            {
                entry.buses += 1;
                entry.counts.add(class);
            }
        }

        let total = buses.len();
        let parked = buses.iter().filter(|b| b.spot.is_some()).count();
        let occupancy = occupancy_pct(parked);
        Self {
            total: counts.total(),
            counts,
            pax,
            flights: flights.len(),
            visas,
            parked,
            free_spots: SPOT_COUNT - parked.min(SPOT_COUNT),
            occupancy_pct: occupancy,
            peak_occupancy_pct: peak_occupancy_pct.max(occupancy),
            on_time_rate_pct: rounded_pct((counts.early + counts.ontime) as usize, total),
            avg_pax: if total == 0 {
                0
            } else {
                (pax as f64 / total as f64).round() as u32
            },
            gates,
            shift: Shift::at(now),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
