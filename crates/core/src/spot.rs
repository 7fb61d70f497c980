// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parking spots and the one-bus-per-spot allocator
//!
//! Spots are numbered 1..=87. Every allocator operation validates first
//! and mutates only on success, so a failed call leaves the map untouched.

use crate::id::BusId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Lowest spot number
pub const FIRST_SPOT: u16 = 1;
/// Highest spot number
pub const LAST_SPOT: u16 = 87;
/// Number of spots in the yard
pub const SPOT_COUNT: usize = LAST_SPOT as usize;
/// Last spot of the entrance display zone
pub const ENTRANCE_LAST: u16 = 42;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpotError {
    #[error("spot {0} is out of range (1-87)")]
    OutOfRange(u16),
    #[error("spot {spot} is already occupied by bus {holder}")]
    Occupied { spot: Spot, holder: BusId },
    #[error("bus {0} does not hold a spot")]
    NotHeld(BusId),
}

/// A validated spot number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Spot(u16);

impl Spot {
    pub fn new(n: u16) -> Result<Self, SpotError> {
        if (FIRST_SPOT..=LAST_SPOT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(SpotError::OutOfRange(n))
        }
    }

    pub fn number(&self) -> u16 {
        self.0
    }

    /// Display partition the spot belongs to
    pub fn zone(&self) -> SpotZone {
        if self.0 <= ENTRANCE_LAST {
            SpotZone::Entrance
        } else {
            SpotZone::Exit
        }
    }

    /// All spots in ascending order
    pub fn all() -> impl Iterator<Item = Spot> {
        (FIRST_SPOT..=LAST_SPOT).map(Spot)
    }
}

impl TryFrom<u16> for Spot {
    type Error = SpotError;

    fn try_from(n: u16) -> Result<Self, Self::Error> {
        Spot::new(n)
    }
}

impl From<Spot> for u16 {
    fn from(spot: Spot) -> Self {
        spot.0
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display partition of the yard. Allocation does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotZone {
    Entrance,
    Exit,
}

/// Outcome of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Spot, to: Spot },
    Unchanged(Spot),
}

/// Tracks which bus holds which spot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotAllocator {
    held: BTreeMap<Spot, BusId>,
}

impl SpotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus currently holding the spot
    pub fn holder(&self, spot: Spot) -> Option<&BusId> {
        self.held.get(&spot)
    }

    /// Spot currently held by the bus
    pub fn spot_of(&self, bus: &BusId) -> Option<Spot> {
        self.held
            .iter()
            .find(|(_, holder)| *holder == bus)
            .map(|(spot, _)| *spot)
    }

    pub fn is_free(&self, spot: Spot) -> bool {
        !self.held.contains_key(&spot)
    }

    pub fn occupied(&self) -> usize {
        self.held.len()
    }

    pub fn free(&self) -> usize {
        SPOT_COUNT - self.held.len()
    }

    /// Held spots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (Spot, &BusId)> {
        self.held.iter().map(|(spot, bus)| (*spot, bus))
    }

    /// Give `spot` to `bus`. A bus already parked elsewhere is moved.
    pub fn assign(&mut self, bus: &BusId, spot: Spot) -> Result<(), SpotError> {
        self.ensure_available(bus, spot)?;
        if let Some(previous) = self.spot_of(bus) {
            self.held.remove(&previous);
        }
        self.held.insert(spot, bus.clone());
        Ok(())
    }

    /// Move a parked bus to `to`. Moving onto its own spot changes nothing.
    pub fn move_to(&mut self, bus: &BusId, to: Spot) -> Result<MoveOutcome, SpotError> {
        let from = self
            .spot_of(bus)
            .ok_or_else(|| SpotError::NotHeld(bus.clone()))?;
        if from == to {
            return Ok(MoveOutcome::Unchanged(from));
        }
        self.ensure_available(bus, to)?;
        self.held.remove(&from);
        self.held.insert(to, bus.clone());
        Ok(MoveOutcome::Moved { from, to })
    }

    /// Release whatever spot the bus holds. Idempotent.
    pub fn vacate(&mut self, bus: &BusId) -> Option<Spot> {
        let spot = self.spot_of(bus)?;
        self.held.remove(&spot);
        Some(spot)
    }

    fn ensure_available(&self, bus: &BusId, spot: Spot) -> Result<(), SpotError> {
        match self.held.get(&spot) {
            Some(holder) if holder != bus => Err(SpotError::Occupied {
                spot,
                holder: holder.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "spot_tests.rs"]
mod tests;
