// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn spot(n: u16) -> Spot {
    Spot::new(n).unwrap()
}

#[test]
fn resubmission_keeps_fields_it_does_not_mention() {
    let mut forms = Forms::default();
    forms.merge(StageForm::SpotAssignment(SpotAssignmentForm {
        park_no: Some(spot(12)),
        gate_no: Some(Gate::B1),
        bag_status: Some(BagStatus::Checked),
        ..Default::default()
    }));
    forms.merge(StageForm::SpotAssignment(SpotAssignmentForm {
        park_no: Some(spot(14)),
        ..Default::default()
    }));

    let lounge = forms.spot_assignment.unwrap();
    assert_eq!(lounge.park_no, Some(spot(14)));
    assert_eq!(lounge.gate_no, Some(Gate::B1));
    assert_eq!(lounge.bag_status, Some(BagStatus::Checked));
}

#[test]
fn completed_lists_stages_in_lifecycle_order() {
    let mut forms = Forms::default();
    forms.merge(StageForm::Departure(DepartureForm::default()));
    forms.merge(StageForm::Registration(RegistrationForm::default()));
    assert_eq!(
        forms.completed(),
        vec![Stage::Registration, Stage::Departure]
    );
    assert!(!forms.has(Stage::SpotAssignment));
}

#[test]
fn release_and_departure_require_the_lounge_stage() {
    assert_eq!(Stage::SpotRelease.requires(), Some(Stage::SpotAssignment));
    assert_eq!(Stage::Departure.requires(), Some(Stage::SpotAssignment));
    assert_eq!(Stage::Registration.requires(), None);
}

#[test]
fn stamp_sets_the_submission_time() {
    let at = chrono::DateTime::parse_from_rfc3339("2026-06-01T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let mut form = StageForm::SpotRelease(SpotReleaseForm::default());
    form.stamp(at);
    let StageForm::SpotRelease(release) = form else {
        panic!("stage changed");
    };
    assert_eq!(release.timestamp, Some(at));
}

#[test]
fn forms_use_stored_field_names() {
    let mut forms = Forms::default();
    forms.merge(StageForm::Registration(RegistrationForm {
        bus_plate: Some("ABC-123".into()),
        visa_type: Some(VisaCategory::Gcc),
        dispatch_sts: Some(DispatchStatus::SharedTrips),
        ..Default::default()
    }));
    let json = serde_json::to_value(&forms).unwrap();
    assert_eq!(json["ScrSegregationIn"]["BusPlate"], "ABC-123");
    assert_eq!(json["ScrSegregationIn"]["VisaType"], "GCC");
    assert_eq!(json["ScrSegregationIn"]["DispatchSts"], "Shared Trips");
    assert!(json.get("ScrWelcomeLounge").is_none());
}

#[test]
fn stored_string_inputs_decode() {
    let raw = r#"{
        "ScrSegregationIn": {"BusPlate": "XYZ", "PaxCount": "35", "VisaType": "", "BusNO": 7},
        "ScrWelcomeLounge": {"ParkNO": "12", "GetaNO": "C2", "FlightSts": "On Time", "BagStatus": "None"},
        "ScrCurbside": {"DelayReason": "ZMZM"},
        "ScrLogIn": {"user": "ignored"}
    }"#;
    let forms: Forms = serde_json::from_str(raw).unwrap();
    let check_in = forms.registration.unwrap();
    assert_eq!(check_in.pax_count, Some(35));
    assert_eq!(check_in.visa_type, None);
    assert_eq!(check_in.bus_no.as_deref(), Some("7"));
    let lounge = forms.spot_assignment.unwrap();
    assert_eq!(lounge.park_no, Some(spot(12)));
    assert_eq!(lounge.gate_no, Some(Gate::C2));
    assert_eq!(lounge.flight_sts, Some(FlightStatus::OnTime));
    assert_eq!(lounge.bag_status, Some(BagStatus::NoBags));
    assert_eq!(
        forms.departure.unwrap().delay_reason,
        Some(DelayReason::Zmzm)
    );
}

#[test]
fn out_of_range_spot_in_a_form_is_dropped() {
    let lounge: SpotAssignmentForm = serde_json::from_str(r#"{"ParkNO": 99}"#).unwrap();
    assert_eq!(lounge.park_no, None);
}
