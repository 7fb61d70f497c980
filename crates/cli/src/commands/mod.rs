// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod bus;
pub mod list;
pub mod seed;
pub mod settings;
pub mod watch;

use serde::de::DeserializeOwned;
use serde_json::Value;
use yard_core::Spot;

/// Parse a value by its wire name, e.g. `GCC` or `"On Time"`
pub fn choice<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unrecognized value {raw:?}"))
}

pub fn parse_spot(raw: &str) -> Result<Spot, String> {
    let n: u16 = raw
        .trim()
        .parse()
        .map_err(|_| format!("spot must be a number, got {raw:?}"))?;
    Spot::new(n).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yard_core::forms::{DelayReason, FlightStatus};
    use yard_core::VisaCategory;

    #[test]
    fn choices_parse_by_wire_name() {
        assert_eq!(choice::<VisaCategory>("GCC"), Ok(VisaCategory::Gcc));
        assert_eq!(choice::<FlightStatus>("On Time"), Ok(FlightStatus::OnTime));
        assert_eq!(choice::<DelayReason>("ZMZM"), Ok(DelayReason::Zmzm));
        assert!(choice::<VisaCategory>("Student").is_err());
    }

    #[test]
    fn spots_are_range_checked() {
        assert_eq!(parse_spot("87").map(|s| s.number()), Ok(87));
        assert!(parse_spot("0").is_err());
        assert!(parse_spot("88").is_err());
        assert!(parse_spot("x").is_err());
    }
}
