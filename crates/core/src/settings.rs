// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator settings persisted under `LOCC_Settings`

use crate::status::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// On/off switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Toggles {
    /// Audible cue on critical alerts
    pub sound: bool,
    /// Echo alerts as notifications
    pub notif: bool,
    /// Periodic display refresh; carried for display collaborators
    pub auto_refresh: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            sound: false,
            notif: true,
            auto_refresh: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Sound,
    Notif,
    AutoRefresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown setting: {0:?} (expected sound, notif or autoRefresh)")]
pub struct UnknownToggle(pub String);

impl FromStr for Toggle {
    type Err = UnknownToggle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "sound" => Ok(Toggle::Sound),
            "notif" | "notifications" => Ok(Toggle::Notif),
            "autorefresh" => Ok(Toggle::AutoRefresh),
            _ => Err(UnknownToggle(s.to_string())),
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Toggle::Sound => "sound",
            Toggle::Notif => "notif",
            Toggle::AutoRefresh => "autoRefresh",
        })
    }
}

impl Toggles {
    /// Flip a switch, returning its new value
    pub fn toggle(&mut self, which: Toggle) -> bool {
        let slot = match which {
            Toggle::Sound => &mut self.sound,
            Toggle::Notif => &mut self.notif,
            Toggle::AutoRefresh => &mut self.auto_refresh,
        };
        *slot = !*slot;
        *slot
    }

    pub fn get(&self, which: Toggle) -> bool {
        match which {
            Toggle::Sound => self.sound,
            Toggle::Notif => self.notif,
            Toggle::AutoRefresh => self.auto_refresh,
        }
    }
}

/// Display colors, carried opaquely
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: String,
    pub early: String,
    pub ontime: String,
    pub late: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: "#ffd700".to_string(),
            early: "#4caf50".to_string(),
            ontime: "#2196f3".to_string(),
            late: "#f44336".to_string(),
        }
    }
}

pub const DEFAULT_SPOT_SIZE: u32 = 80;

fn default_spot_size() -> u32 {
    DEFAULT_SPOT_SIZE
}

/// Everything stored in the settings blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub thresholds: Thresholds,
    pub settings: Toggles,
    pub colors: Colors,
    #[serde(default = "default_spot_size")]
    pub spot_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            settings: Toggles::default(),
            colors: Colors::default(),
            spot_size: DEFAULT_SPOT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_install() {
        let s = Settings::default();
        assert_eq!(s.thresholds, Thresholds { early: 7.0, late: 3.0 });
        assert!(!s.settings.sound);
        assert!(s.settings.notif);
        assert!(s.settings.auto_refresh);
        assert_eq!(s.spot_size, 80);
    }

    #[test]
    fn partial_blob_fills_in_defaults() {
        let raw = r#"{"thresholds": {"early": 6, "late": 2}, "settings": {"sound": true}}"#;
        let s: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(s.thresholds.early, 6.0);
        assert!(s.settings.sound);
        assert!(s.settings.notif);
        assert_eq!(s.colors, Colors::default());
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["settings"]["autoRefresh"], true);
        assert_eq!(json["spotSize"], 80);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut t = Toggles::default();
        assert!(t.toggle(Toggle::Sound));
        assert!(t.get(Toggle::Sound));
        assert!(!t.toggle("auto-refresh".parse().unwrap()));
        assert!("volume".parse::<Toggle>().is_err());
    }
}
