// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Departure urgency classification
//!
//! A bus is classified by the signed number of hours left until its
//! departure, compared against two configurable thresholds:
//!
//! - more than `early` hours left: [`StatusClass::Early`]
//! - between `late` and `early` hours (both inclusive): [`StatusClass::OnTime`]
//! - fewer than `late` hours left, or overdue: [`StatusClass::Late`]
//!
//! Classification never fails. A missing or unparseable departure, or a
//! difference that is not a finite number, classifies as `Late` with zero
//! hours.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Naive `datetime-local` layouts accepted besides RFC 3339
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Urgency class of a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Early,
    #[serde(alias = "onTime", alias = "on_time")]
    OnTime,
    Late,
}

impl StatusClass {
    pub fn label(&self) -> &'static str {
        match self {
            StatusClass::Early => "Early",
            StatusClass::OnTime => "On Time",
            StatusClass::Late => "Late",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying one departure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub class: StatusClass,
    /// Signed hours until departure; zero for invalid data
    pub hours: f64,
}

impl Status {
    /// Fallback for missing or unusable departure data
    pub const INVALID: Status = Status {
        class: StatusClass::Late,
        hours: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} threshold must be a finite, non-negative number of hours (got {value})")]
    Invalid { name: &'static str, value: f64 },
}

/// Hour boundaries separating the status classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub early: f64,
    pub late: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            early: 7.0,
            late: 3.0,
        }
    }
}

impl Thresholds {
    /// Validated thresholds. `early < late` is accepted but logged.
    pub fn new(early: f64, late: f64) -> Result<Self, ThresholdError> {
        check_threshold("early", early)?;
        check_threshold("late", late)?;
        if early < late {
            tracing::warn!(early, late, "early threshold is below late threshold");
        }
        Ok(Self { early, late })
    }

    /// Classify a signed hour difference
    pub fn classify_hours(&self, diff: f64) -> Status {
        if !diff.is_finite() {
            return Status::INVALID;
        }
        let class = if diff > self.early {
            StatusClass::Early
        } else if diff >= self.late {
            StatusClass::OnTime
        } else {
            StatusClass::Late
        };
        Status { class, hours: diff }
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ThresholdError::Invalid { name, value })
    }
}

/// Parse a captured departure/arrival timestamp.
///
/// Accepts RFC 3339, or a naive `datetime-local` value interpreted in local
/// wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(raw, fmt).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}

/// Signed hours from `now` until `departure`
pub fn hours_until(now: DateTime<Utc>, departure: DateTime<Utc>) -> f64 {
    (departure - now).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Classify a raw departure value at `now`
pub fn classify(now: DateTime<Utc>, departure: Option<&str>, thresholds: &Thresholds) -> Status {
    match departure.and_then(parse_timestamp) {
        Some(departure) => thresholds.classify_hours(hours_until(now, departure)),
        None => Status::INVALID,
    }
}

/// Time left until departure, for countdown displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Departure missing or unparseable
    Unknown,
    Overdue,
    Remaining(Duration),
}

impl Countdown {
    pub fn until(now: DateTime<Utc>, departure: Option<&str>) -> Self {
        let Some(departure) = departure.and_then(parse_timestamp) else {
            return Countdown::Unknown;
        };
        match (departure - now).to_std() {
            Ok(left) if !left.is_zero() => Countdown::Remaining(left),
            _ => Countdown::Overdue,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Unknown => f.write_str("--:--:--"),
            Countdown::Overdue => f.write_str("Overdue"),
            Countdown::Remaining(left) => {
                let secs = left.as_secs();
                write!(
                    f,
                    "{:02}:{:02}:{:02}",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
