// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage forms captured along a bus's path through the yard
//!
//! Each stage keeps one record per bus. Resubmitting a stage merges the new
//! record into the old one field by field: a field present in the new
//! submission wins, an absent field keeps its earlier value.
//!
//! Field names on the wire match the keys operators' snapshots already use
//! (`BusPlate`, `ParkNO`, ...), so old data keeps loading.

use crate::gate::Gate;
use crate::lenient;
use crate::spot::Spot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Arrival and check-in
    #[serde(rename = "ScrSegregationIn")]
    Registration,
    /// Spot and gate assignment in the lounge
    #[serde(rename = "ScrWelcomeLounge")]
    SpotAssignment,
    /// Exit from the yard; frees the spot
    #[serde(rename = "ScrSegregationExit")]
    SpotRelease,
    /// Curbside departure
    #[serde(rename = "ScrCurbside")]
    Departure,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Registration,
        Stage::SpotAssignment,
        Stage::SpotRelease,
        Stage::Departure,
    ];

    /// Key the stage's record is stored under
    pub fn form_key(&self) -> &'static str {
        match self {
            Stage::Registration => "ScrSegregationIn",
            Stage::SpotAssignment => "ScrWelcomeLounge",
            Stage::SpotRelease => "ScrSegregationExit",
            Stage::Departure => "ScrCurbside",
        }
    }

    /// Stage that must be recorded before this one may be
    pub fn requires(&self) -> Option<Stage> {
        match self {
            Stage::Registration | Stage::SpotAssignment => None,
            Stage::SpotRelease | Stage::Departure => Some(Stage::SpotAssignment),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Registration => "registration",
            Stage::SpotAssignment => "spot assignment",
            Stage::SpotRelease => "spot release",
            Stage::Departure => "departure",
        })
    }
}

/// Visa category of a bus's passengers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisaCategory {
    Hajj,
    Umrah,
    Visit,
    Tourism,
    #[serde(rename = "GCC")]
    Gcc,
    Work,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchStatus {
    #[serde(rename = "Shared Trips")]
    SharedTrips,
    #[serde(rename = "Shared Trips and Lounges")]
    SharedTripsAndLounges,
    Early,
    Late,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BagStatus {
    Checked,
    Mixed,
    #[serde(rename = "None")]
    NoBags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Cancelled,
    Departed,
}

/// Terminal 3 coordination action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum T3Action {
    Waiting,
    Approval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayReason {
    #[serde(rename = "Passport Distribution")]
    PassportDistribution,
    #[serde(rename = "ZMZM")]
    Zmzm,
    Bags,
    Operations,
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Check-in record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(
        rename = "BusPlate",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_plate: Option<String>,
    #[serde(
        rename = "BusNO",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_no: Option<String>,
    #[serde(
        rename = "TripCount",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub trip_count: Option<String>,
    /// Scheduled departure as captured
    #[serde(
        rename = "DepTime",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dep_time: Option<String>,
    #[serde(
        rename = "FlightNo",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight_no: Option<String>,
    #[serde(
        rename = "CurDT",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cur_dt: Option<String>,
    #[serde(
        rename = "TerminalCd",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub terminal_cd: Option<String>,
    #[serde(
        rename = "TotalPax",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_pax: Option<String>,
    #[serde(
        rename = "PaxCount",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pax_count: Option<u32>,
    #[serde(
        rename = "Destination",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
    #[serde(
        rename = "DispatchSts",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub dispatch_sts: Option<DispatchStatus>,
    #[serde(
        rename = "VisaType",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub visa_type: Option<VisaCategory>,
    #[serde(
        rename = "UmrahCop",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub umrah_cop: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RegistrationForm {
    fn merge(&mut self, other: Self) {
        overwrite(&mut self.bus_plate, other.bus_plate);
        overwrite(&mut self.bus_no, other.bus_no);
        overwrite(&mut self.trip_count, other.trip_count);
        overwrite(&mut self.dep_time, other.dep_time);
        overwrite(&mut self.flight_no, other.flight_no);
        overwrite(&mut self.cur_dt, other.cur_dt);
        overwrite(&mut self.terminal_cd, other.terminal_cd);
        overwrite(&mut self.total_pax, other.total_pax);
        overwrite(&mut self.pax_count, other.pax_count);
        overwrite(&mut self.destination, other.destination);
        overwrite(&mut self.dispatch_sts, other.dispatch_sts);
        overwrite(&mut self.visa_type, other.visa_type);
        overwrite(&mut self.umrah_cop, other.umrah_cop);
        overwrite(&mut self.timestamp, other.timestamp);
    }
}

/// Lounge record: where the bus parks and which gate it boards from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotAssignmentForm {
    #[serde(
        rename = "BusNO",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_no: Option<String>,
    #[serde(
        rename = "BusPlate",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_plate: Option<String>,
    #[serde(
        rename = "ParkNO",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub park_no: Option<Spot>,
    #[serde(
        rename = "GetaNO",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gate_no: Option<Gate>,
    #[serde(
        rename = "BagStatus",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bag_status: Option<BagStatus>,
    #[serde(
        rename = "T3CALL",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub t3_call: Option<String>,
    #[serde(
        rename = "FlightSts",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight_sts: Option<FlightStatus>,
    #[serde(
        rename = "T3ACT",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub t3_act: Option<T3Action>,
    #[serde(
        rename = "T3APRO",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub t3_apro: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SpotAssignmentForm {
    fn merge(&mut self, other: Self) {
        overwrite(&mut self.bus_no, other.bus_no);
        overwrite(&mut self.bus_plate, other.bus_plate);
        overwrite(&mut self.park_no, other.park_no);
        overwrite(&mut self.gate_no, other.gate_no);
        overwrite(&mut self.bag_status, other.bag_status);
        overwrite(&mut self.t3_call, other.t3_call);
        overwrite(&mut self.flight_sts, other.flight_sts);
        overwrite(&mut self.t3_act, other.t3_act);
        overwrite(&mut self.t3_apro, other.t3_apro);
        overwrite(&mut self.timestamp, other.timestamp);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotReleaseForm {
    #[serde(
        rename = "FlightNo",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight_no: Option<String>,
    #[serde(
        rename = "BusPlate",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_plate: Option<String>,
    #[serde(
        rename = "BusNO",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_no: Option<String>,
    #[serde(
        rename = "ExitDT",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_dt: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SpotReleaseForm {
    fn merge(&mut self, other: Self) {
        overwrite(&mut self.flight_no, other.flight_no);
        overwrite(&mut self.bus_plate, other.bus_plate);
        overwrite(&mut self.bus_no, other.bus_no);
        overwrite(&mut self.exit_dt, other.exit_dt);
        overwrite(&mut self.timestamp, other.timestamp);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartureForm {
    #[serde(
        rename = "BusNO",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_no: Option<String>,
    #[serde(
        rename = "BusDepDT",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_dep_dt: Option<String>,
    #[serde(
        rename = "PaxDisembarkDT",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pax_disembark_dt: Option<String>,
    #[serde(
        rename = "BusArrDT",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_arr_dt: Option<String>,
    #[serde(
        rename = "DelayReason",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delay_reason: Option<DelayReason>,
    #[serde(
        rename = "BusPlate",
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bus_plate: Option<String>,
    #[serde(
        rename = "FlightSts",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight_sts: Option<FlightStatus>,
    #[serde(
        rename = "GetaNO",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gate_no: Option<Gate>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl DepartureForm {
    fn merge(&mut self, other: Self) {
        overwrite(&mut self.bus_no, other.bus_no);
        overwrite(&mut self.bus_dep_dt, other.bus_dep_dt);
        overwrite(&mut self.pax_disembark_dt, other.pax_disembark_dt);
        overwrite(&mut self.bus_arr_dt, other.bus_arr_dt);
        overwrite(&mut self.delay_reason, other.delay_reason);
        overwrite(&mut self.bus_plate, other.bus_plate);
        overwrite(&mut self.flight_sts, other.flight_sts);
        overwrite(&mut self.gate_no, other.gate_no);
        overwrite(&mut self.timestamp, other.timestamp);
    }
}

/// One submitted stage record
#[derive(Debug, Clone, PartialEq)]
pub enum StageForm {
    Registration(RegistrationForm),
    SpotAssignment(SpotAssignmentForm),
    SpotRelease(SpotReleaseForm),
    Departure(DepartureForm),
}

impl StageForm {
    pub fn stage(&self) -> Stage {
        match self {
            StageForm::Registration(_) => Stage::Registration,
            StageForm::SpotAssignment(_) => Stage::SpotAssignment,
            StageForm::SpotRelease(_) => Stage::SpotRelease,
            StageForm::Departure(_) => Stage::Departure,
        }
    }

    /// Record the submission time
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        let slot = match self {
            StageForm::Registration(f) => &mut f.timestamp,
            StageForm::SpotAssignment(f) => &mut f.timestamp,
            StageForm::SpotRelease(f) => &mut f.timestamp,
            StageForm::Departure(f) => &mut f.timestamp,
        };
        *slot = Some(at);
    }
}

/// All stage records kept for one bus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forms {
    #[serde(rename = "ScrSegregationIn", default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationForm>,
    #[serde(rename = "ScrWelcomeLounge", default, skip_serializing_if = "Option::is_none")]
    pub spot_assignment: Option<SpotAssignmentForm>,
    #[serde(rename = "ScrSegregationExit", default, skip_serializing_if = "Option::is_none")]
    pub spot_release: Option<SpotReleaseForm>,
    #[serde(rename = "ScrCurbside", default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<DepartureForm>,
}

impl Forms {
    /// Merge a submission into the stored record for its stage
    pub fn merge(&mut self, form: StageForm) {
        match form {
            StageForm::Registration(f) => self
                .registration
                .get_or_insert_with(Default::default)
                .merge(f),
            StageForm::SpotAssignment(f) => self
                .spot_assignment
                .get_or_insert_with(Default::default)
                .merge(f),
            StageForm::SpotRelease(f) => self
                .spot_release
                .get_or_insert_with(Default::default)
                .merge(f),
            StageForm::Departure(f) => self
                .departure
                .get_or_insert_with(Default::default)
                .merge(f),
        }
    }

    pub fn has(&self, stage: Stage) -> bool {
        match stage {
            Stage::Registration => self.registration.is_some(),
            Stage::SpotAssignment => self.spot_assignment.is_some(),
            Stage::SpotRelease => self.spot_release.is_some(),
            Stage::Departure => self.departure.is_some(),
        }
    }

    /// Stages recorded so far, in lifecycle order
    pub fn completed(&self) -> Vec<Stage> {
        Stage::ALL.into_iter().filter(|s| self.has(*s)).collect()
    }
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod tests;
