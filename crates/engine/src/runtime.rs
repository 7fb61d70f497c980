// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime that drives the yard
//!
//! The runtime owns the [`Yard`] controller, feeds it commands and timer
//! ticks, and hands the resulting effects to the [`Executor`]. One
//! `now` is read per cycle so every task in that cycle agrees on time.

use crate::scheduler::TimerKind;
use crate::{error::RuntimeError, Executor, Scheduler};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use yard_adapters::{NotifyAdapter, SoundAdapter};
use yard_core::config::Intervals;
use yard_core::{
    Alert, BoardSummary, BusId, Clock, DepartureForm, Effect, IdGen, MoveOutcome, NotifyKind,
    RegistrationForm, Spot, SpotAssignmentForm, SpotReleaseForm, Thresholds, Toggle, Yard,
    YardError,
};
use yard_storage::{KvStore, StateStore};

/// Runtime adapter dependencies
pub struct RuntimeDeps<N, S, K: KvStore> {
    pub notify: N,
    pub sound: S,
    pub store: StateStore<K>,
}

/// An operator request
#[derive(Debug, Clone)]
pub enum Command {
    Register(RegistrationForm),
    Amend {
        id: BusId,
        form: RegistrationForm,
    },
    AssignSpot {
        id: BusId,
        form: SpotAssignmentForm,
    },
    ReleaseSpot {
        id: BusId,
        form: SpotReleaseForm,
    },
    Depart {
        id: BusId,
        form: DepartureForm,
    },
    MoveSpot {
        id: BusId,
        to: Spot,
    },
    DeleteAt(Spot),
    Remove(BusId),
    SetThresholds {
        early: f64,
        late: f64,
    },
    ToggleSetting(Toggle),
    ClearAlerts,
    /// Run one monitor tick now and persist the updated monitor state
    Tick,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::Amend { .. } => "amend",
            Command::AssignSpot { .. } => "assign_spot",
            Command::ReleaseSpot { .. } => "release_spot",
            Command::Depart { .. } => "depart",
            Command::MoveSpot { .. } => "move_spot",
            Command::DeleteAt(_) => "delete_at",
            Command::Remove(_) => "remove",
            Command::SetThresholds { .. } => "set_thresholds",
            Command::ToggleSetting(_) => "toggle_setting",
            Command::ClearAlerts => "clear_alerts",
            Command::Tick => "tick",
        }
    }
}

/// What a successful command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Registered(BusId),
    Assigned(Spot),
    Moved(MoveOutcome),
    Deleted(BusId),
    Thresholds(Thresholds),
    Toggled { toggle: Toggle, enabled: bool },
    Alerts(Vec<Alert>),
    Done,
}

/// Runtime that coordinates the system
pub struct Runtime<N, S, K: KvStore, C: Clock, I: IdGen> {
    yard: Yard,
    executor: Executor<N, S, K>,
    scheduler: Scheduler,
    clock: C,
    id_gen: I,
    intervals: Intervals,
}

impl<N, S, K, C, I> Runtime<N, S, K, C, I>
where
    N: NotifyAdapter,
    S: SoundAdapter,
    K: KvStore,
    C: Clock,
    I: IdGen,
{
    /// Create a runtime from whatever state the store holds
    pub fn new(deps: RuntimeDeps<N, S, K>, clock: C, id_gen: I, intervals: Intervals) -> Self {
        let yard = Yard::restore(deps.store.load_snapshot(), deps.store.load_settings());
        tracing::debug!(
            active = yard.registry().buses().len(),
            departed = yard.registry().departed().len(),
            "yard restored"
        );
        Self {
            yard,
            executor: Executor::new(deps.notify, deps.sound, deps.store),
            scheduler: Scheduler::new(),
            clock,
            id_gen,
            intervals,
        }
    }

    pub fn yard(&self) -> &Yard {
        &self.yard
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn board(&self) -> BoardSummary {
        self.yard.board(self.clock.now())
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Apply a command and run its effects.
    ///
    /// A rejected command leaves the yard untouched, surfaces an error
    /// notification and returns the rejection.
    pub async fn handle(&mut self, command: Command) -> Result<Reply, RuntimeError> {
        let name = command.name();
        let now = self.clock.now();
        match self.apply(command, now) {
            Ok((reply, effects)) => {
                tracing::debug!(command = name, effects = effects.len(), "command applied");
                self.executor.execute_all(effects, &self.yard).await?;
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!(command = name, error = %e, "command rejected");
                let report = Effect::notify(NotifyKind::Error, "Error", e.to_string());
                if let Err(notify_err) = self.executor.execute(report, &self.yard).await {
                    tracing::debug!(error = %notify_err, "rejection notice not delivered");
                }
                Err(e.into())
            }
        }
    }

    fn apply(
        &mut self,
        command: Command,
        now: DateTime<Utc>,
    ) -> Result<(Reply, Vec<Effect>), YardError> {
        let yard = &mut self.yard;
        let out = match command {
            Command::Register(form) => {
                let (id, effects) = yard.register(self.id_gen.next(), form, now)?;
                (Reply::Registered(id), effects)
            }
            Command::Amend { id, form } => {
                let ((), effects) = yard.amend(&id, form, now)?;
                (Reply::Done, effects)
            }
            Command::AssignSpot { id, form } => {
                let (spot, effects) = yard.assign_spot(&id, form, now)?;
                (Reply::Assigned(spot), effects)
            }
            Command::ReleaseSpot { id, form } => {
                let ((), effects) = yard.release_spot(&id, form, now)?;
                (Reply::Done, effects)
            }
            Command::Depart { id, form } => {
                let ((), effects) = yard.depart(&id, form, now)?;
                (Reply::Done, effects)
            }
            Command::MoveSpot { id, to } => {
                let (outcome, effects) = yard.move_spot(&id, to)?;
                (Reply::Moved(outcome), effects)
            }
            Command::DeleteAt(spot) => {
                let (id, effects) = yard.delete_at(spot)?;
                (Reply::Deleted(id), effects)
            }
            Command::Remove(id) => {
                let (id, effects) = yard.remove(&id)?;
                (Reply::Deleted(id), effects)
            }
            Command::SetThresholds { early, late } => {
                let (thresholds, effects) = yard.set_thresholds(early, late)?;
                (Reply::Thresholds(thresholds), effects)
            }
            Command::ToggleSetting(toggle) => {
                let (enabled, effects) = yard.toggle_setting(toggle);
                (Reply::Toggled { toggle, enabled }, effects)
            }
            Command::ClearAlerts => (Reply::Done, yard.clear_alerts()),
            Command::Tick => {
                let (alerts, mut effects) = yard.tick(now);
                effects.push(Effect::SaveSnapshot);
                (Reply::Alerts(alerts), effects)
            }
        };
        Ok(out)
    }

    /// Handle one fired timer
    pub async fn on_timer(
        &mut self,
        kind: TimerKind,
        now: DateTime<Utc>,
    ) -> Result<(), RuntimeError> {
        match kind {
            TimerKind::ClockRefresh => {
                let shift = self.yard.refresh_clock(now);
                tracing::trace!(%shift, "clock refreshed");
            }
            TimerKind::Monitor => {
                let (alerts, effects) = self.yard.tick(now);
                if !alerts.is_empty() {
                    tracing::debug!(alerts = alerts.len(), "monitor tick raised alerts");
                }
                self.executor.execute_all(effects, &self.yard).await?;
            }
            TimerKind::Snapshot => {
                self.executor
                    .execute(Effect::SaveSnapshot, &self.yard)
                    .await?;
            }
        }
        Ok(())
    }

    /// Run every timer due at `now`. A failing timer is logged and does
    /// not prevent the others, or its own next run.
    pub async fn run_due(&mut self, now: DateTime<Utc>) -> Vec<TimerKind> {
        let due = self.scheduler.poll(now);
        for kind in &due {
            if let Err(e) = self.on_timer(*kind, now).await {
                tracing::error!(timer = %kind, error = %e, "timer handler failed");
            }
        }
        due
    }

    /// Install the periodic tasks, replacing any already installed
    pub fn start_timers(&mut self) {
        self.scheduler
            .install_defaults(&self.intervals, self.clock.now());
    }

    /// Drive the periodic tasks until cancelled, then write a final snapshot
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), RuntimeError> {
        self.start_timers();
        tracing::info!(
            clock = ?self.intervals.clock,
            monitor = ?self.intervals.monitor,
            snapshot = ?self.intervals.snapshot,
            "runtime started"
        );

        loop {
            let now = self.clock.now();
            let wait = self
                .scheduler
                .next_deadline()
                .and_then(|deadline| (deadline - now).to_std().ok())
                .unwrap_or(Duration::ZERO);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {
                    let now = self.clock.now();
                    self.run_due(now).await;
                }
            }
        }

        self.scheduler.cancel_all();
        tracing::info!("runtime stopping");
        self.executor
            .execute(Effect::SaveSnapshot, &self.yard)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
