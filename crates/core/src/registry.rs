// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active buses, departed history and the stage transitions between them
//!
//! Every operation validates before it mutates: on error the registry is
//! left exactly as it was. `Bus::spot` always mirrors the allocator.

use crate::bus::{Bus, EmptyPlate};
use crate::forms::{
    DepartureForm, RegistrationForm, SpotAssignmentForm, SpotReleaseForm, Stage, StageForm,
};
use crate::gate::Gate;
use crate::id::BusId;
use crate::spot::{MoveOutcome, Spot, SpotAllocator, SpotError};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("bus plate is required")]
    EmptyPlate,
    #[error("bus {0} is already registered")]
    DuplicateId(BusId),
    #[error("bus {0} not found")]
    BusNotFound(BusId),
    #[error("a spot number (1-87) is required")]
    SpotRequired,
    #[error("no bus is parked at spot {0}")]
    SpotEmpty(Spot),
    #[error("{stage} requires {requires} to be recorded first")]
    StageOutOfOrder { stage: Stage, requires: Stage },
    #[error(transparent)]
    Spot(#[from] SpotError),
}

impl From<EmptyPlate> for RegistryError {
    fn from(_: EmptyPlate) -> Self {
        RegistryError::EmptyPlate
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    buses: Vec<Bus>,
    /// Newest first
    departed: Vec<Bus>,
    spots: SpotAllocator,
}

fn stamped(form: StageForm, now: DateTime<Utc>) -> StageForm {
    let mut form = form;
    form.stamp(now);
    form
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted lists. An id seen twice keeps only its first
    /// entry. A spot claimed twice stays with the first claimant; later
    /// claimants lose it.
    pub fn from_parts(buses: Vec<Bus>, departed: Vec<Bus>) -> Self {
        let mut seen = HashSet::new();
        let mut buses: Vec<Bus> = buses
            .into_iter()
            .filter(|bus| {
                let fresh = seen.insert(bus.id.clone());
                if !fresh {
                    tracing::warn!(
                        bus_id = %bus.id,
                        plate = %bus.plate,
                        "dropping duplicate bus id"
                    );
                }
                fresh
            })
            .collect();
        let mut spots = SpotAllocator::new();
        for bus in &mut buses {
            let Some(spot) = bus.spot else { continue };
            if let Err(e) = spots.assign(&bus.id, spot) {
                tracing::warn!(bus_id = %bus.id, %spot, error = %e, "dropping conflicting spot");
                bus.spot = None;
            }
        }
        Self {
            buses,
            departed,
            spots,
        }
    }

    /// Active buses in registration order
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Departed history, newest first
    pub fn departed(&self) -> &[Bus] {
        &self.departed
    }

    pub fn spots(&self) -> &SpotAllocator {
        &self.spots
    }

    pub(crate) fn buses_mut(&mut self) -> impl Iterator<Item = &mut Bus> {
        self.buses.iter_mut()
    }

    pub fn get(&self, id: &BusId) -> Option<&Bus> {
        self.buses.iter().find(|b| &b.id == id)
    }

    fn index_of(&self, id: &BusId) -> Result<usize, RegistryError> {
        self.buses
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| RegistryError::BusNotFound(id.clone()))
    }

    fn require_stage(bus: &Bus, stage: Stage) -> Result<(), RegistryError> {
        match stage.requires() {
            Some(requires) if !bus.has_stage(requires) => {
                Err(RegistryError::StageOutOfOrder { stage, requires })
            }
            _ => Ok(()),
        }
    }

    /// Check a bus in. It starts with no spot and no gate.
    pub fn register(
        &mut self,
        id: BusId,
        form: RegistrationForm,
        now: DateTime<Utc>,
    ) -> Result<&Bus, RegistryError> {
        if self.get(&id).is_some() {
            return Err(RegistryError::DuplicateId(id));
        }
        let mut form = form;
        form.timestamp = Some(now);
        let bus = Bus::from_registration(id, form, now)?;
        tracing::info!(bus_id = %bus.id, plate = %bus.plate, "bus registered");
        self.buses.push(bus);
        let last = self.buses.len() - 1;
        Ok(&self.buses[last])
    }

    /// Resubmit the check-in form of an active bus
    pub fn amend(
        &mut self,
        id: &BusId,
        form: RegistrationForm,
        now: DateTime<Utc>,
    ) -> Result<&Bus, RegistryError> {
        let idx = self.index_of(id)?;
        let mut form = form;
        form.timestamp = Some(now);
        self.buses[idx].amend(form)?;
        tracing::info!(bus_id = %id, "registration amended");
        Ok(&self.buses[idx])
    }

    /// Park a bus at the form's spot and record its gate. A bus already
    /// parked elsewhere moves. Without a gate in the form the bus keeps
    /// the gate it had.
    pub fn assign_spot(
        &mut self,
        id: &BusId,
        form: SpotAssignmentForm,
        now: DateTime<Utc>,
    ) -> Result<&Bus, RegistryError> {
        let idx = self.index_of(id)?;
        let spot = form.park_no.ok_or(RegistryError::SpotRequired)?;
        self.spots.assign(id, spot)?;

        let bus = &mut self.buses[idx];
        bus.spot = Some(spot);
        if let Some(gate) = form.gate_no {
            bus.gate = Some(gate);
        }
        bus.forms.merge(stamped(StageForm::SpotAssignment(form), now));
        tracing::info!(bus_id = %id, %spot, gate = ?bus.gate, "spot assigned");
        Ok(&self.buses[idx])
    }

    /// Vacate the bus's spot; it stays active at its gate
    pub fn release_spot(
        &mut self,
        id: &BusId,
        form: SpotReleaseForm,
        now: DateTime<Utc>,
    ) -> Result<&Bus, RegistryError> {
        let idx = self.index_of(id)?;
        Self::require_stage(&self.buses[idx], Stage::SpotRelease)?;

        let released = self.spots.vacate(id);
        let bus = &mut self.buses[idx];
        bus.spot = None;
        bus.forms.merge(stamped(StageForm::SpotRelease(form), now));
        tracing::info!(bus_id = %id, spot = ?released, "spot released");
        Ok(&self.buses[idx])
    }

    /// Move the bus to departed history
    pub fn depart(
        &mut self,
        id: &BusId,
        form: DepartureForm,
        now: DateTime<Utc>,
    ) -> Result<&Bus, RegistryError> {
        let idx = self.index_of(id)?;
        Self::require_stage(&self.buses[idx], Stage::Departure)?;

        self.spots.vacate(id);
        let mut bus = self.buses.remove(idx);
        bus.spot = None;
        if let Some(gate) = form.gate_no {
            bus.gate = Some(gate);
        }
        bus.forms.merge(stamped(StageForm::Departure(form), now));
        tracing::info!(bus_id = %id, "bus departed");
        self.departed.insert(0, bus);
        Ok(&self.departed[0])
    }

    /// Move a parked bus to another spot
    pub fn move_spot(&mut self, id: &BusId, to: Spot) -> Result<MoveOutcome, RegistryError> {
        let idx = self.index_of(id)?;
        let outcome = self.spots.move_to(id, to)?;
        self.buses[idx].spot = Some(to);
        tracing::info!(bus_id = %id, ?outcome, "spot move");
        Ok(outcome)
    }

    /// Delete whichever bus holds `spot`. Departed history is untouched.
    pub fn delete_at(&mut self, spot: Spot) -> Result<Bus, RegistryError> {
        let id = self
            .spots
            .holder(spot)
            .cloned()
            .ok_or(RegistryError::SpotEmpty(spot))?;
        self.remove(&id)
    }

    /// Delete a bus in any state, releasing its spot
    pub fn remove(&mut self, id: &BusId) -> Result<Bus, RegistryError> {
        let idx = self.index_of(id)?;
        self.spots.vacate(id);
        let mut bus = self.buses.remove(idx);
        bus.spot = None;
        tracing::info!(bus_id = %id, "bus deleted");
        Ok(bus)
    }

    /// Parked buses with `lo <= spot <= hi`, ascending by spot
    pub fn list_by_spot_range(&self, lo: u16, hi: u16) -> Vec<&Bus> {
        self.spots
            .iter()
            .filter(|(spot, _)| (lo..=hi).contains(&spot.number()))
            .filter_map(|(_, id)| self.get(id))
            .collect()
    }

    /// Every active bus boarding from `gate`, parked or not
    pub fn list_by_gate(&self, gate: Gate) -> Vec<&Bus> {
        self.buses.iter().filter(|b| b.gate == Some(gate)).collect()
    }

    /// Registered buses with neither spot nor gate
    pub fn awaiting_spot(&self) -> Vec<&Bus> {
        self.buses.iter().filter(|b| b.is_awaiting_spot()).collect()
    }

    /// Buses that left their spot and wait at a gate
    pub fn at_gates(&self) -> Vec<&Bus> {
        self.buses.iter().filter(|b| b.is_at_gate()).collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
