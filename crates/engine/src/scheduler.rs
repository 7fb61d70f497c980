// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic timers for the clock refresh, monitor tick and snapshot

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use yard_core::config::Intervals;

/// The periodic tasks. Declaration order is firing order within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    ClockRefresh,
    Monitor,
    Snapshot,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [
        TimerKind::ClockRefresh,
        TimerKind::Monitor,
        TimerKind::Snapshot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TimerKind::ClockRefresh => "clock",
            TimerKind::Monitor => "monitor",
            TimerKind::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
struct Timer {
    interval: TimeDelta,
    armed_at: DateTime<Utc>,
    fire_at: DateTime<Utc>,
}

impl Timer {
    fn arm(interval: TimeDelta, now: DateTime<Utc>) -> Self {
        Self {
            interval,
            armed_at: now,
            fire_at: now.checked_add_signed(interval).unwrap_or(now),
        }
    }
}

/// Repeating timers keyed by kind; each kind exists at most once
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: BTreeMap<TimerKind, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a repeating timer, replacing any existing timer of that kind
    pub fn install(&mut self, kind: TimerKind, interval: Duration, now: DateTime<Utc>) {
        let interval = TimeDelta::from_std(interval).unwrap_or(TimeDelta::MAX);
        if self.timers.insert(kind, Timer::arm(interval, now)).is_some() {
            tracing::debug!(%kind, "replaced existing timer");
        }
    }

    /// Cancel every timer, then install all three periodic tasks
    pub fn install_defaults(&mut self, intervals: &Intervals, now: DateTime<Utc>) {
        self.cancel_all();
        self.install(TimerKind::ClockRefresh, intervals.clock, now);
        self.install(TimerKind::Monitor, intervals.monitor, now);
        self.install(TimerKind::Snapshot, intervals.snapshot, now);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.remove(&kind);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_installed(&self, kind: TimerKind) -> bool {
        self.timers.contains_key(&kind)
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Timers due at `now`, in firing order. Each fired timer is re-armed
    /// one interval after `now`; missed periods are not replayed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<TimerKind> {
        let mut due = Vec::new();
        for (kind, timer) in self.timers.iter_mut() {
            if now < timer.armed_at {
                tracing::warn!(%kind, "clock moved backwards, re-arming timer");
                *timer = Timer::arm(timer.interval, now);
                continue;
            }
            if timer.fire_at <= now {
                *timer = Timer::arm(timer.interval, now);
                due.push(*kind);
            }
        }
        due
    }

    /// Earliest pending fire time
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.values().map(|t| t.fire_at).min()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
