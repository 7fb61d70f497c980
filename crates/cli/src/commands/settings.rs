// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thresholds, toggles, board and daily statistics

use crate::app::YardRuntime;
use crate::output::{self, Ack, AlertLine, BoardView, OutputFormat, SettingsView, ThresholdsView};
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::fmt;
use yard_core::aggregate::DailyAggregate;
use yard_core::Toggle;
use yard_engine::{Command, Reply};

#[derive(Subcommand, Debug)]
pub enum ThresholdsCommand {
    /// Show the early/late thresholds
    Show,
    /// Replace both thresholds (hours)
    Set { early: f64, late: f64 },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show all operator settings
    Show,
    /// Flip a toggle: sound, notif or autoRefresh
    Toggle { name: Toggle },
}

pub async fn thresholds(
    runtime: &mut YardRuntime,
    command: ThresholdsCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ThresholdsCommand::Show => {
            output::print(&ThresholdsView(*runtime.yard().thresholds()), format)
        }
        ThresholdsCommand::Set { early, late } => {
            let reply = runtime
                .handle(Command::SetThresholds { early, late })
                .await?;
            if let Reply::Thresholds(t) = reply {
                output::print(&ThresholdsView(t), format);
            }
        }
    }
    Ok(())
}

pub async fn settings(
    runtime: &mut YardRuntime,
    command: SettingsCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        SettingsCommand::Show => output::print(&SettingsView(runtime.yard().settings()), format),
        SettingsCommand::Toggle { name } => {
            if let Reply::Toggled { toggle, enabled } =
                runtime.handle(Command::ToggleSetting(name)).await?
            {
                let state = if enabled { "Enabled" } else { "Disabled" };
                output::print(&Ack::new(format!("{toggle}: {state}")), format);
            }
        }
    }
    Ok(())
}

pub fn board(runtime: &YardRuntime, format: OutputFormat) {
    output::print(&BoardView(&runtime.board()), format);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView<'a> {
    #[serde(flatten)]
    stats: &'a DailyAggregate,
    flight_count: usize,
}

impl fmt::Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        writeln!(f, "Buses registered: {}", s.buses)?;
        writeln!(f, "Passengers: {}", s.pax)?;
        writeln!(f, "Flights: {}", self.flight_count)?;
        write!(
            f,
            "At check-in: early {} / on time {} / late {}",
            s.early, s.ontime, s.late
        )
    }
}

pub fn stats(runtime: &YardRuntime, format: OutputFormat) {
    let stats = runtime.yard().aggregate();
    output::print(
        &StatsView {
            stats,
            flight_count: stats.flight_count(),
        },
        format,
    );
}

/// One monitor tick; prints the alerts it raised
pub async fn tick(runtime: &mut YardRuntime, format: OutputFormat) -> Result<()> {
    if let Reply::Alerts(alerts) = runtime.handle(Command::Tick).await? {
        let lines: Vec<AlertLine<'_>> = alerts.iter().map(AlertLine).collect();
        output::print_list(&lines, format, "No alerts");
    }
    Ok(())
}
