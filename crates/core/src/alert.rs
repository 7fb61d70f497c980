// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, newest-first alert log

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of alerts retained
pub const ALERT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Critical,
    Warning,
    Info,
    Success,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertKind::Critical => "critical",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
            AlertKind::Success => "success",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    /// Local wall-clock time, `HH:MM:SS`
    pub time: String,
}

#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
    next_id: u64,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an alert, evicting the oldest past capacity
    pub fn push(
        &mut self,
        kind: AlertKind,
        title: impl Into<String>,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) -> &Alert {
        self.next_id += 1;
        self.entries.push_front(Alert {
            id: self.next_id,
            kind,
            title: title.into(),
            message: message.into(),
            time: at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        });
        self.entries.truncate(ALERT_CAPACITY);
        &self.entries[0]
    }

    /// Alerts, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
