// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boarding gates: ten named gates, two per zone A–E

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gate: {0:?} (expected A1..E2)")]
pub struct UnknownGate(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gate {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    D1,
    D2,
    E1,
    E2,
}

impl Gate {
    pub const ALL: [Gate; 10] = [
        Gate::A1,
        Gate::A2,
        Gate::B1,
        Gate::B2,
        Gate::C1,
        Gate::C2,
        Gate::D1,
        Gate::D2,
        Gate::E1,
        Gate::E2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gate::A1 => "A1",
            Gate::A2 => "A2",
            Gate::B1 => "B1",
            Gate::B2 => "B2",
            Gate::C1 => "C1",
            Gate::C2 => "C2",
            Gate::D1 => "D1",
            Gate::D2 => "D2",
            Gate::E1 => "E1",
            Gate::E2 => "E2",
        }
    }

    /// Zone letter the gate belongs to
    pub fn zone(&self) -> char {
        match self {
            Gate::A1 | Gate::A2 => 'A',
            Gate::B1 | Gate::B2 => 'B',
            Gate::C1 | Gate::C2 => 'C',
            Gate::D1 | Gate::D2 => 'D',
            Gate::E1 | Gate::E2 => 'E',
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gate {
    type Err = UnknownGate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Gate::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownGate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("c2".parse::<Gate>(), Ok(Gate::C2));
        assert_eq!(" E1 ".parse::<Gate>(), Ok(Gate::E1));
        assert!("F1".parse::<Gate>().is_err());
    }

    #[test]
    fn two_gates_per_zone() {
        for zone in ['A', 'B', 'C', 'D', 'E'] {
            assert_eq!(Gate::ALL.iter().filter(|g| g.zone() == zone).count(), 2);
        }
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Gate::B1).unwrap(), "\"B1\"");
    }
}
