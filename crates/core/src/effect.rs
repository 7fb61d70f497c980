// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Side effects requested by the yard controller
//!
//! The controller never talks to the outside world itself. Every operation
//! returns the effects it wants performed and the engine's executor carries
//! them out against the adapters.

use crate::alert::AlertKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Error,
    Warning,
    Info,
}

impl From<AlertKind> for NotifyKind {
    fn from(kind: AlertKind) -> Self {
        match kind {
            AlertKind::Critical => NotifyKind::Error,
            AlertKind::Warning => NotifyKind::Warning,
            AlertKind::Info => NotifyKind::Info,
            AlertKind::Success => NotifyKind::Success,
        }
    }
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotifyKind::Success => "success",
            NotifyKind::Error => "error",
            NotifyKind::Warning => "warning",
            NotifyKind::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a transient notification
    Notify {
        kind: NotifyKind,
        title: String,
        message: String,
    },
    /// Sound the audible alert cue
    PlaySound,
    /// Write the registry snapshot (`BUS_DATA`)
    SaveSnapshot,
    /// Write operator settings (`LOCC_Settings`)
    SaveSettings,
}

impl Effect {
    pub fn notify(kind: NotifyKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Effect::Notify {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Short name for logs and spans
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Notify { .. } => "notify",
            Effect::PlaySound => "play_sound",
            Effect::SaveSnapshot => "save_snapshot",
            Effect::SaveSettings => "save_settings",
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
