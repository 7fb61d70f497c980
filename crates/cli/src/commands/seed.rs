// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo fleet for an empty yard

use crate::app::YardRuntime;
use crate::output::{self, Ack, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use yard_core::{Gate, RegistrationForm, Spot, SpotAssignmentForm, VisaCategory};
use yard_engine::{Command, Reply};

const VISAS: [VisaCategory; 6] = [
    VisaCategory::Hajj,
    VisaCategory::Umrah,
    VisaCategory::Visit,
    VisaCategory::Tourism,
    VisaCategory::Gcc,
    VisaCategory::Work,
];

const TERMINALS: [&str; 3] = ["HT", "NT", "T1"];

/// One parked demo bus: its check-in and its spot
#[derive(Debug)]
struct DemoBus {
    check_in: RegistrationForm,
    spot: u16,
    gate: Gate,
}

/// Twenty parked buses on spots 1-20: ten already past departure, five
/// due in 4-5h and five due in 8-10h
fn demo_fleet(now: DateTime<Utc>) -> Vec<DemoBus> {
    (1..=20u16)
        .map(|i| {
            let n = i64::from(i);
            let (prefix, departs_in, destination) = match i {
                1..=10 => ('L', -Duration::minutes(60 + n * 10), "Makkah"),
                11..=15 => ('O', Duration::minutes(240 + (n - 11) * 15), "Madinah"),
                _ => ('E', Duration::minutes(480 + (n - 16) * 30), "Jeddah"),
            };
            let idx = usize::from(i);
            DemoBus {
                check_in: RegistrationForm {
                    bus_plate: Some(format!("{prefix}{}SRA", 1000 + i)),
                    bus_no: Some((100 + i).to_string()),
                    flight_no: Some(format!("SV{}", 1000 + i)),
                    pax_count: Some(30 + u32::from(i * 7 % 20)),
                    visa_type: Some(VISAS[idx % VISAS.len()]),
                    terminal_cd: Some(TERMINALS[idx % TERMINALS.len()].to_string()),
                    destination: Some(destination.to_string()),
                    dep_time: Some((now + departs_in).to_rfc3339()),
                    ..Default::default()
                },
                spot: i,
                gate: Gate::ALL[idx % Gate::ALL.len()],
            }
        })
        .collect()
}

/// Register and park the demo fleet. A yard that already has active
/// buses is left alone.
pub async fn seed(runtime: &mut YardRuntime, format: OutputFormat) -> Result<()> {
    let active = runtime.yard().registry().buses().len();
    if active > 0 {
        output::print(
            &Ack::new(format!("Yard already has {active} active buses, nothing seeded")),
            format,
        );
        return Ok(());
    }

    let fleet = demo_fleet(runtime.now());
    let count = fleet.len();
    for bus in fleet {
        let Reply::Registered(id) = runtime.handle(Command::Register(bus.check_in)).await? else {
            continue;
        };
        let form = SpotAssignmentForm {
            park_no: Some(Spot::new(bus.spot)?),
            gate_no: Some(bus.gate),
            ..Default::default()
        };
        runtime.handle(Command::AssignSpot { id, form }).await?;
    }
    tracing::info!(count, "demo fleet seeded");
    output::print(&Ack::new(format!("Seeded {count} demo buses")), format);
    Ok(())
}
