// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The bus record

use crate::forms::{Forms, RegistrationForm, Stage, StageForm, VisaCategory};
use crate::gate::Gate;
use crate::id::BusId;
use crate::lenient;
use crate::spot::Spot;
use crate::status::{classify, Countdown, Status, StatusClass, Thresholds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bus moving through the yard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: BusId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub plate: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub bus_no: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub flight: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub pax: u32,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub visa: Option<VisaCategory>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub terminal: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: String,
    /// Departure exactly as captured; may be missing or unparseable
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub departure: Option<String>,
    pub arrival: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub spot: Option<Spot>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub gate: Option<Gate>,
    #[serde(default)]
    pub forms: Forms,
    /// Monitor cache: class seen on the last tick
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<StatusClass>,
    /// Monitor cache: hours left on the last tick
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub previous_hours: Option<f64>,
}

/// The registration form carried no usable plate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyPlate;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Bus {
    /// Create a bus from its check-in form. The form is kept as the
    /// registration record.
    pub fn from_registration(
        id: BusId,
        form: RegistrationForm,
        now: DateTime<Utc>,
    ) -> Result<Self, EmptyPlate> {
        let plate = form
            .bus_plate
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(EmptyPlate)?
            .to_string();
        let mut bus = Bus {
            id,
            plate,
            bus_no: form.bus_no.clone().unwrap_or_default(),
            flight: form.flight_no.clone().unwrap_or_default(),
            pax: form.pax_count.unwrap_or(0),
            visa: form.visa_type,
            terminal: form.terminal_cd.clone().unwrap_or_default(),
            destination: form.destination.clone().unwrap_or_default(),
            departure: non_empty(form.dep_time.clone()),
            arrival: now,
            spot: None,
            gate: None,
            forms: Forms::default(),
            previous_status: None,
            previous_hours: None,
        };
        bus.forms.merge(StageForm::Registration(form));
        Ok(bus)
    }

    /// Apply a resubmitted check-in form: supplied fields refresh the bus,
    /// absent ones keep their values.
    pub fn amend(&mut self, form: RegistrationForm) -> Result<(), EmptyPlate> {
        let plate = match form.bus_plate.as_deref().map(str::trim) {
            Some("") => return Err(EmptyPlate),
            Some(plate) => Some(plate.to_string()),
            None => None,
        };
        if let Some(plate) = plate {
            self.plate = plate;
        }
        if let Some(bus_no) = &form.bus_no {
            self.bus_no = bus_no.clone();
        }
        if let Some(flight) = &form.flight_no {
            self.flight = flight.clone();
        }
        if let Some(pax) = form.pax_count {
            self.pax = pax;
        }
        if form.visa_type.is_some() {
            self.visa = form.visa_type;
        }
        if let Some(terminal) = &form.terminal_cd {
            self.terminal = terminal.clone();
        }
        if let Some(destination) = &form.destination {
            self.destination = destination.clone();
        }
        if form.dep_time.is_some() {
            self.departure = non_empty(form.dep_time.clone());
        }
        self.forms.merge(StageForm::Registration(form));
        Ok(())
    }

    pub fn status(&self, now: DateTime<Utc>, thresholds: &Thresholds) -> Status {
        classify(now, self.departure.as_deref(), thresholds)
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::until(now, self.departure.as_deref())
    }

    /// Registered but not yet parked or gated
    pub fn is_awaiting_spot(&self) -> bool {
        self.spot.is_none() && self.gate.is_none()
    }

    /// Left its spot, waiting at a gate
    pub fn is_at_gate(&self) -> bool {
        self.spot.is_none() && self.gate.is_some()
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.forms.has(stage)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
