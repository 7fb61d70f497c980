// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The yard controller
//!
//! [`Yard`] owns the registry, the daily counters, the alert log and the
//! operator settings. Each operation mutates that state and returns the
//! effects it wants carried out; nothing here performs I/O. Time comes in
//! as an explicit `now` so one engine cycle sees one instant.

use crate::aggregate::DailyAggregate;
use crate::alert::{Alert, AlertLog};
use crate::board::{occupancy_pct, BoardSummary, Shift};
use crate::effect::{Effect, NotifyKind};
use crate::forms::{DepartureForm, RegistrationForm, SpotAssignmentForm, SpotReleaseForm};
use crate::id::BusId;
use crate::monitor::{self, Transition};
use crate::registry::{Registry, RegistryError};
use crate::settings::{Settings, Toggle};
use crate::snapshot::Snapshot;
use crate::spot::{MoveOutcome, Spot};
use crate::status::{ThresholdError, Thresholds};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum YardError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

/// Result of a mutation: its value plus the effects to run
pub type Outcome<T> = Result<(T, Vec<Effect>), YardError>;

#[derive(Debug, Clone, Default)]
pub struct Yard {
    registry: Registry,
    aggregate: DailyAggregate,
    alerts: AlertLog,
    settings: Settings,
    peak_occupancy_pct: u32,
}

impl Yard {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Rebuild from persisted state
    pub fn restore(snapshot: Snapshot, settings: Settings) -> Self {
        let registry = Registry::from_parts(snapshot.bus_data, snapshot.departed_buses);
        let peak_occupancy_pct = occupancy_pct(registry.spots().occupied());
        Self {
            registry,
            aggregate: snapshot.daily_stats.unwrap_or_default(),
            alerts: AlertLog::new(),
            settings,
            peak_occupancy_pct,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bus_data: self.registry.buses().to_vec(),
            departed_buses: self.registry.departed().to_vec(),
            daily_stats: Some(self.aggregate.clone()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn aggregate(&self) -> &DailyAggregate {
        &self.aggregate
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.settings.thresholds
    }

    // ---- stage transitions ----

    /// Check a bus in and count it in the daily totals
    pub fn register(
        &mut self,
        id: BusId,
        form: RegistrationForm,
        now: DateTime<Utc>,
    ) -> Outcome<BusId> {
        let thresholds = self.settings.thresholds;
        let bus = self.registry.register(id, form, now)?;
        let class = bus.status(now, &thresholds).class;
        self.aggregate.record(bus, class);
        let message = format!(
            "Bus {} registered - assign a spot from the registered list",
            bus.plate
        );
        Ok((
            bus.id.clone(),
            vec![
                Effect::notify(NotifyKind::Success, "ScrSegregationIn", message),
                Effect::SaveSnapshot,
            ],
        ))
    }

    /// Resubmit a bus's check-in form. Daily totals are not touched.
    pub fn amend(&mut self, id: &BusId, form: RegistrationForm, now: DateTime<Utc>) -> Outcome<()> {
        let bus = self.registry.amend(id, form, now)?;
        let message = format!("Bus {} updated", bus.plate);
        Ok((
            (),
            vec![
                Effect::notify(NotifyKind::Success, "ScrSegregationIn", message),
                Effect::SaveSnapshot,
            ],
        ))
    }

    pub fn assign_spot(
        &mut self,
        id: &BusId,
        form: SpotAssignmentForm,
        now: DateTime<Utc>,
    ) -> Outcome<Spot> {
        let bus = self.registry.assign_spot(id, form, now)?;
        let spot = bus.spot.ok_or(RegistryError::SpotRequired)?;
        Ok((
            spot,
            vec![
                Effect::notify(
                    NotifyKind::Success,
                    "ScrWelcomeLounge",
                    format!("Spot {spot} assigned to bus"),
                ),
                Effect::SaveSnapshot,
            ],
        ))
    }

    pub fn release_spot(
        &mut self,
        id: &BusId,
        form: SpotReleaseForm,
        now: DateTime<Utc>,
    ) -> Outcome<()> {
        self.registry.release_spot(id, form, now)?;
        Ok((
            (),
            vec![
                Effect::notify(NotifyKind::Success, "ScrSegregationExit", "Spot evacuated"),
                Effect::SaveSnapshot,
            ],
        ))
    }

    pub fn depart(&mut self, id: &BusId, form: DepartureForm, now: DateTime<Utc>) -> Outcome<()> {
        self.registry.depart(id, form, now)?;
        Ok((
            (),
            vec![
                Effect::notify(NotifyKind::Success, "ScrCurbside", "Bus departure registered"),
                Effect::SaveSnapshot,
            ],
        ))
    }

    pub fn move_spot(&mut self, id: &BusId, to: Spot) -> Outcome<MoveOutcome> {
        let outcome = self.registry.move_spot(id, to)?;
        let effects = match outcome {
            MoveOutcome::Moved { to, .. } => vec![
                Effect::notify(NotifyKind::Success, "Move", format!("Bus moved to spot {to}")),
                Effect::SaveSnapshot,
            ],
            MoveOutcome::Unchanged(spot) => vec![Effect::notify(
                NotifyKind::Info,
                "Move",
                format!("Bus already at spot {spot}"),
            )],
        };
        Ok((outcome, effects))
    }

    /// Delete the bus parked at `spot`
    pub fn delete_at(&mut self, spot: Spot) -> Outcome<BusId> {
        let bus = self.registry.delete_at(spot)?;
        Ok((bus.id, deleted_effects()))
    }

    /// Delete a bus in any state
    pub fn remove(&mut self, id: &BusId) -> Outcome<BusId> {
        let bus = self.registry.remove(id)?;
        Ok((bus.id, deleted_effects()))
    }

    // ---- periodic work ----

    /// Clock/display refresh: track peak occupancy and report the shift
    pub fn refresh_clock(&mut self, now: DateTime<Utc>) -> Shift {
        let occupancy = occupancy_pct(self.registry.spots().occupied());
        if occupancy > self.peak_occupancy_pct {
            tracing::debug!(occupancy, "new peak occupancy");
            self.peak_occupancy_pct = occupancy;
        }
        Shift::at(now)
    }

    /// Monitor tick: diff every active bus against its cached status and
    /// raise alerts for qualifying transitions.
    pub fn tick(&mut self, now: DateTime<Utc>) -> (Vec<Alert>, Vec<Effect>) {
        let thresholds = self.settings.thresholds;
        let mut fired: Vec<(Transition, String)> = Vec::new();
        for bus in self.registry.buses_mut() {
            for transition in monitor::evaluate(bus, now, &thresholds) {
                fired.push((transition, bus.plate.clone()));
            }
        }

        let toggles = self.settings.settings;
        let mut alerts = Vec::with_capacity(fired.len());
        let mut effects = Vec::new();
        for (transition, plate) in fired {
            let kind = transition.alert_kind();
            let alert = self
                .alerts
                .push(kind, transition.title(), transition.message(&plate), now)
                .clone();
            tracing::info!(%kind, %plate, title = %alert.title, "alert raised");
            if toggles.notif {
                effects.push(Effect::notify(
                    kind.into(),
                    alert.title.clone(),
                    alert.message.clone(),
                ));
            }
            if transition == Transition::CriticallyLate && toggles.sound {
                effects.push(Effect::PlaySound);
            }
            alerts.push(alert);
        }
        (alerts, effects)
    }

    // ---- settings ----

    /// Replace the thresholds. Cached monitor state is left alone, so the
    /// next tick compares against classes computed under the old values.
    pub fn set_thresholds(&mut self, early: f64, late: f64) -> Outcome<Thresholds> {
        let thresholds = Thresholds::new(early, late)?;
        self.settings.thresholds = thresholds;
        tracing::info!(early, late, "thresholds updated");
        Ok((
            thresholds,
            vec![
                Effect::notify(NotifyKind::Success, "Settings", "Time thresholds updated"),
                Effect::SaveSettings,
            ],
        ))
    }

    pub fn toggle_setting(&mut self, which: Toggle) -> (bool, Vec<Effect>) {
        let enabled = self.settings.settings.toggle(which);
        let state = if enabled { "Enabled" } else { "Disabled" };
        (
            enabled,
            vec![
                Effect::notify(NotifyKind::Info, "Settings", format!("{which}: {state}")),
                Effect::SaveSettings,
            ],
        )
    }

    pub fn clear_alerts(&mut self) -> Vec<Effect> {
        self.alerts.clear();
        vec![Effect::notify(NotifyKind::Info, "Alerts", "All alerts cleared")]
    }

    pub fn board(&self, now: DateTime<Utc>) -> BoardSummary {
        BoardSummary::compute(
            self.registry.buses(),
            now,
            &self.settings.thresholds,
            self.peak_occupancy_pct,
        )
    }
}

fn deleted_effects() -> Vec<Effect> {
    vec![
        Effect::notify(NotifyKind::Warning, "Delete", "Bus deleted"),
        Effect::SaveSnapshot,
    ]
}

#[cfg(test)]
#[path = "yard_tests.rs"]
mod tests;
