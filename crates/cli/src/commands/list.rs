// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only listings over the registry

use crate::app::YardRuntime;
use crate::output::{self, BusView, OutputFormat};
use clap::Subcommand;
use yard_core::{Bus, Gate};

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Parked buses by spot number
    Spots {
        /// First spot of the range
        #[arg(long, default_value_t = 1)]
        from: u16,
        /// Last spot of the range
        #[arg(long, default_value_t = 87)]
        to: u16,
    },
    /// Buses assigned to one gate
    Gate { gate: Gate },
    /// Registered buses still waiting for a spot
    Registered,
    /// Buses holding a gate
    Gates,
    /// Departed buses, newest first
    Departed,
}

pub fn handle(runtime: &YardRuntime, command: ListCommand, format: OutputFormat) {
    let registry = runtime.yard().registry();
    let (buses, empty): (Vec<&Bus>, &str) = match command {
        ListCommand::Spots { from, to } => {
            (registry.list_by_spot_range(from, to), "No parked buses")
        }
        ListCommand::Gate { gate } => (registry.list_by_gate(gate), "No buses at this gate"),
        ListCommand::Registered => (registry.awaiting_spot(), "No buses waiting for a spot"),
        ListCommand::Gates => (registry.at_gates(), "No buses at gates"),
        ListCommand::Departed => (registry.departed().iter().collect(), "No departed buses"),
    };
    let now = runtime.now();
    let thresholds = runtime.yard().thresholds();
    let rows: Vec<BusView<'_>> = buses
        .into_iter()
        .map(|bus| BusView::new(bus, now, thresholds))
        .collect();
    output::print_list(&rows, format, empty);
}
