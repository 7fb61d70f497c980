// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus lifecycle commands: one per stage transition, plus move/delete/show

use super::{choice, parse_spot};
use crate::app::{resolve_bus, YardRuntime};
use crate::output::{self, Ack, BusDetail, BusView, OutputFormat};
use anyhow::Result;
use clap::Args;
use yard_core::forms::{BagStatus, DelayReason, DispatchStatus, FlightStatus, T3Action};
use yard_core::{
    Bus, DepartureForm, Gate, MoveOutcome, RegistrationForm, Spot, SpotAssignmentForm,
    SpotReleaseForm, VisaCategory,
};
use yard_engine::{Command, Reply};

/// Check-in fields shared by `register` and `amend`
#[derive(Args, Debug, Default)]
pub struct CheckInFields {
    /// Fleet number painted on the bus
    #[arg(long)]
    bus_no: Option<String>,
    /// Flight code
    #[arg(long)]
    flight: Option<String>,
    /// Passengers on board
    #[arg(long)]
    pax: Option<u32>,
    /// Scheduled departure, RFC 3339 or local `YYYY-MM-DDTHH:MM`
    #[arg(long)]
    departure: Option<String>,
    /// Hajj, Umrah, Visit, Tourism, GCC or Work
    #[arg(long, value_parser = choice::<VisaCategory>)]
    visa: Option<VisaCategory>,
    #[arg(long)]
    terminal: Option<String>,
    #[arg(long)]
    destination: Option<String>,
    #[arg(long)]
    trips: Option<String>,
    #[arg(long)]
    total_pax: Option<String>,
    /// e.g. "Shared Trips"
    #[arg(long, value_parser = choice::<DispatchStatus>)]
    dispatch: Option<DispatchStatus>,
    #[arg(long)]
    umrah_cop: Option<String>,
    /// Current date/time as written on the check-in sheet
    #[arg(long)]
    checked_in_at: Option<String>,
}

impl CheckInFields {
    fn into_form(self, plate: Option<String>) -> RegistrationForm {
        RegistrationForm {
            bus_plate: plate,
            bus_no: self.bus_no,
            trip_count: self.trips,
            dep_time: self.departure,
            flight_no: self.flight,
            cur_dt: self.checked_in_at,
            terminal_cd: self.terminal,
            total_pax: self.total_pax,
            pax_count: self.pax,
            destination: self.destination,
            dispatch_sts: self.dispatch,
            visa_type: self.visa,
            umrah_cop: self.umrah_cop,
            timestamp: None,
        }
    }
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// License plate
    #[arg(long)]
    plate: String,
    #[command(flatten)]
    fields: CheckInFields,
}

#[derive(Args, Debug)]
pub struct AmendArgs {
    /// Bus id or plate
    bus: String,
    /// New license plate
    #[arg(long)]
    plate: Option<String>,
    #[command(flatten)]
    fields: CheckInFields,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Bus id or plate
    bus: String,
    /// Parking spot, 1-87
    #[arg(long, value_parser = parse_spot)]
    spot: Spot,
    /// Boarding gate, A1..E2
    #[arg(long)]
    gate: Option<Gate>,
    /// Checked, Mixed or None
    #[arg(long, value_parser = choice::<BagStatus>)]
    bags: Option<BagStatus>,
    /// "On Time", Delayed, Cancelled or Departed
    #[arg(long, value_parser = choice::<FlightStatus>)]
    flight_status: Option<FlightStatus>,
    #[arg(long)]
    t3_call: Option<String>,
    /// Waiting or Approval
    #[arg(long, value_parser = choice::<T3Action>)]
    t3_action: Option<T3Action>,
    #[arg(long)]
    t3_approval: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Bus id or plate
    bus: String,
    /// Exit time
    #[arg(long)]
    exit_time: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepartArgs {
    /// Bus id or plate
    bus: String,
    #[arg(long)]
    departed_at: Option<String>,
    #[arg(long)]
    disembarked_at: Option<String>,
    #[arg(long)]
    arrived_at: Option<String>,
    /// "Passport Distribution", ZMZM, Bags or Operations
    #[arg(long, value_parser = choice::<DelayReason>)]
    delay_reason: Option<DelayReason>,
    #[arg(long, value_parser = choice::<FlightStatus>)]
    flight_status: Option<FlightStatus>,
    /// Gate the bus actually departed from
    #[arg(long)]
    gate: Option<Gate>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Bus id or plate
    bus: String,
    /// Destination spot
    #[arg(value_parser = parse_spot)]
    spot: Spot,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Spot whose bus is deleted
    #[arg(value_parser = parse_spot)]
    spot: Spot,
}

#[derive(Args, Debug)]
pub struct BusArg {
    /// Bus id or plate
    bus: String,
}

fn current(runtime: &YardRuntime, key: &str) -> Result<Bus> {
    let id = resolve_bus(runtime.yard(), key)?;
    runtime
        .yard()
        .registry()
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no active bus with id or plate {key}"))
}

pub async fn register(
    runtime: &mut YardRuntime,
    args: RegisterArgs,
    format: OutputFormat,
) -> Result<()> {
    let form = args.fields.into_form(Some(args.plate));
    if let Reply::Registered(id) = runtime.handle(Command::Register(form)).await? {
        output::print(&Ack::new(format!("Registered bus {id}")).with_id(id), format);
    }
    Ok(())
}

pub async fn amend(runtime: &mut YardRuntime, args: AmendArgs, format: OutputFormat) -> Result<()> {
    let id = resolve_bus(runtime.yard(), &args.bus)?;
    let form = args.fields.into_form(args.plate);
    runtime
        .handle(Command::Amend {
            id: id.clone(),
            form,
        })
        .await?;
    output::print(&Ack::new(format!("Updated bus {id}")).with_id(id), format);
    Ok(())
}

pub async fn assign(
    runtime: &mut YardRuntime,
    args: AssignArgs,
    format: OutputFormat,
) -> Result<()> {
    let bus = current(runtime, &args.bus)?;
    let form = SpotAssignmentForm {
        bus_no: Some(bus.bus_no.clone()).filter(|s| !s.is_empty()),
        bus_plate: Some(bus.plate.clone()),
        park_no: Some(args.spot),
        gate_no: args.gate,
        bag_status: args.bags,
        t3_call: args.t3_call,
        flight_sts: args.flight_status,
        t3_act: args.t3_action,
        t3_apro: args.t3_approval,
        timestamp: None,
    };
    if let Reply::Assigned(spot) = runtime
        .handle(Command::AssignSpot {
            id: bus.id.clone(),
            form,
        })
        .await?
    {
        output::print(
            &Ack::new(format!("Spot {spot} assigned to bus {}", bus.plate)).with_id(bus.id),
            format,
        );
    }
    Ok(())
}

pub async fn release(
    runtime: &mut YardRuntime,
    args: ReleaseArgs,
    format: OutputFormat,
) -> Result<()> {
    let bus = current(runtime, &args.bus)?;
    let form = SpotReleaseForm {
        flight_no: Some(bus.flight.clone()).filter(|s| !s.is_empty()),
        bus_plate: Some(bus.plate.clone()),
        bus_no: Some(bus.bus_no.clone()).filter(|s| !s.is_empty()),
        exit_dt: args.exit_time,
        timestamp: None,
    };
    runtime
        .handle(Command::ReleaseSpot {
            id: bus.id.clone(),
            form,
        })
        .await?;
    output::print(
        &Ack::new(format!("Spot evacuated by bus {}", bus.plate)).with_id(bus.id),
        format,
    );
    Ok(())
}

pub async fn depart(
    runtime: &mut YardRuntime,
    args: DepartArgs,
    format: OutputFormat,
) -> Result<()> {
    let bus = current(runtime, &args.bus)?;
    let form = DepartureForm {
        bus_no: Some(bus.bus_no.clone()).filter(|s| !s.is_empty()),
        bus_dep_dt: args.departed_at,
        pax_disembark_dt: args.disembarked_at,
        bus_arr_dt: args.arrived_at,
        delay_reason: args.delay_reason,
        bus_plate: Some(bus.plate.clone()),
        flight_sts: args.flight_status,
        gate_no: args.gate,
        timestamp: None,
    };
    runtime
        .handle(Command::Depart {
            id: bus.id.clone(),
            form,
        })
        .await?;
    output::print(
        &Ack::new(format!("Bus {} departed", bus.plate)).with_id(bus.id),
        format,
    );
    Ok(())
}

pub async fn move_spot(
    runtime: &mut YardRuntime,
    args: MoveArgs,
    format: OutputFormat,
) -> Result<()> {
    let id = resolve_bus(runtime.yard(), &args.bus)?;
    let reply = runtime
        .handle(Command::MoveSpot {
            id: id.clone(),
            to: args.spot,
        })
        .await?;
    let message = match reply {
        Reply::Moved(MoveOutcome::Moved { to, .. }) => format!("Bus moved to spot {to}"),
        Reply::Moved(MoveOutcome::Unchanged(spot)) => format!("Bus already at spot {spot}"),
        _ => "Bus moved".to_string(),
    };
    output::print(&Ack::new(message).with_id(id), format);
    Ok(())
}

pub async fn delete(
    runtime: &mut YardRuntime,
    args: DeleteArgs,
    format: OutputFormat,
) -> Result<()> {
    if let Reply::Deleted(id) = runtime.handle(Command::DeleteAt(args.spot)).await? {
        output::print(
            &Ack::new(format!("Deleted bus {id} from spot {}", args.spot)).with_id(id),
            format,
        );
    }
    Ok(())
}

pub async fn remove(runtime: &mut YardRuntime, args: BusArg, format: OutputFormat) -> Result<()> {
    let id = resolve_bus(runtime.yard(), &args.bus)?;
    if let Reply::Deleted(id) = runtime.handle(Command::Remove(id)).await? {
        output::print(&Ack::new(format!("Deleted bus {id}")).with_id(id), format);
    }
    Ok(())
}

pub fn show(runtime: &YardRuntime, args: BusArg, format: OutputFormat) -> Result<()> {
    let bus = current(runtime, &args.bus)?;
    let view = BusView::new(&bus, runtime.now(), runtime.yard().thresholds());
    output::print(&BusDetail(view), format);
    Ok(())
}
