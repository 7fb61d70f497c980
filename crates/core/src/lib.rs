// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

//! yard-core: domain model for the bus yard
//!
//! This crate provides:
//! - The bus, spot, gate and stage-form model
//! - Departure status classification and the transition monitor
//! - The spot allocator and the bus registry
//! - The [`Yard`] controller, which turns operations into effects

pub mod clock;
pub mod id;
mod lenient;

pub mod gate;
pub mod spot;
pub mod status;

pub mod forms;
pub mod bus;

pub mod aggregate;
pub mod alert;
pub mod board;
pub mod monitor;
pub mod registry;

pub mod config;
pub mod effect;
pub mod settings;
pub mod snapshot;
pub mod yard;

// Re-exports
pub use alert::{Alert, AlertKind, AlertLog};
pub use board::{BoardSummary, Shift};
pub use bus::Bus;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, YardConfig};
pub use effect::{Effect, NotifyKind};
pub use forms::{
    DepartureForm, RegistrationForm, SpotAssignmentForm, SpotReleaseForm, Stage, StageForm,
    VisaCategory,
};
pub use gate::Gate;
pub use id::{BusId, IdGen, SequentialIdGen, UuidIdGen};
pub use registry::{Registry, RegistryError};
pub use settings::{Settings, Toggle};
pub use snapshot::{Snapshot, SETTINGS_KEY, SNAPSHOT_KEY};
pub use spot::{MoveOutcome, Spot, SpotError};
pub use status::{classify, Countdown, Status, StatusClass, Thresholds};
pub use yard::{Outcome, Yard, YardError};
