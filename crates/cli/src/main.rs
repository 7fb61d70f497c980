// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! yard - bus yard lifecycle and status CLI

mod app;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{bus, list, seed, settings, watch};
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yard",
    version,
    about = "yard - track buses from check-in to departure"
)]
struct Cli {
    /// Directory holding the persisted state
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/yard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a bus in
    Register(bus::RegisterArgs),
    /// Correct a bus's check-in details
    Amend(bus::AmendArgs),
    /// Assign a parking spot and gate
    Assign(bus::AssignArgs),
    /// Record the bus leaving its spot
    Release(bus::ReleaseArgs),
    /// Record departure and move the bus to history
    Depart(bus::DepartArgs),
    /// Move a parked bus to another spot
    Move(bus::MoveArgs),
    /// Delete the bus parked at a spot
    Delete(bus::DeleteArgs),
    /// Delete a bus by id or plate
    Remove(bus::BusArg),
    /// Show one bus
    Show(bus::BusArg),
    /// List buses
    #[command(subcommand)]
    List(list::ListCommand),
    /// Live yard summary
    Board,
    /// Check-in counters for the day
    Stats,
    /// Early/late thresholds
    #[command(subcommand)]
    Thresholds(settings::ThresholdsCommand),
    /// Operator toggles
    #[command(subcommand)]
    Settings(settings::SettingsCommand),
    /// Run one monitor tick and print any alerts
    Tick,
    /// Park a demo fleet of 20 buses in an empty yard
    Seed,
    /// Run the periodic tasks until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = app::load_config(cli.config.as_deref())?;
    app::setup_logging(&config);

    let state_dir = app::resolve_state_dir(cli.state_dir, &config)?;
    let mut runtime = app::open_runtime(&state_dir, config.intervals)?;
    let format = cli.format;

    match cli.command {
        Commands::Register(args) => bus::register(&mut runtime, args, format).await?,
        Commands::Amend(args) => bus::amend(&mut runtime, args, format).await?,
        Commands::Assign(args) => bus::assign(&mut runtime, args, format).await?,
        Commands::Release(args) => bus::release(&mut runtime, args, format).await?,
        Commands::Depart(args) => bus::depart(&mut runtime, args, format).await?,
        Commands::Move(args) => bus::move_spot(&mut runtime, args, format).await?,
        Commands::Delete(args) => bus::delete(&mut runtime, args, format).await?,
        Commands::Remove(args) => bus::remove(&mut runtime, args, format).await?,
        Commands::Show(args) => bus::show(&runtime, args, format)?,
        Commands::List(command) => list::handle(&runtime, command, format),
        Commands::Board => settings::board(&runtime, format),
        Commands::Stats => settings::stats(&runtime, format),
        Commands::Thresholds(command) => settings::thresholds(&mut runtime, command, format).await?,
        Commands::Settings(command) => settings::settings(&mut runtime, command, format).await?,
        Commands::Tick => settings::tick(&mut runtime, format).await?,
        Commands::Seed => seed::seed(&mut runtime, format).await?,
        Commands::Watch => watch::watch(runtime).await?,
    }

    Ok(())
}
