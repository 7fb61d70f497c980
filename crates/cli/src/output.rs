// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use yard_core::board::ClassCounts;
use yard_core::{Alert, BoardSummary, Bus, Settings, StatusClass, Thresholds};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items; text output shows `empty` for no items
pub fn print_list<T: Serialize + fmt::Display>(items: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Text if items.is_empty() => println!("{}", empty),
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One-line acknowledgement of a mutation
#[derive(Serialize)]
pub struct Ack {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A bus with its live status at the time of printing
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusView<'a> {
    #[serde(flatten)]
    pub bus: &'a Bus,
    pub status: StatusClass,
    pub hours_left: f64,
    pub countdown: String,
}

impl<'a> BusView<'a> {
    pub fn new(bus: &'a Bus, now: DateTime<Utc>, thresholds: &Thresholds) -> Self {
        let status = bus.status(now, thresholds);
        Self {
            bus,
            status: status.class,
            hours_left: status.hours,
            countdown: bus.countdown(now).to_string(),
        }
    }
}

/// Wire name of a serde enum value, e.g. `GCC` or `On Time`
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

impl fmt::Display for BusView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spot = self.bus.spot.map(|s| s.to_string());
        let gate = self.bus.gate.map(|g| g.to_string());
        write!(
            f,
            "{:>4} {:<12} {:<8} {:<3} {:<8} {:<8} {:>3}  {}",
            spot.as_deref().unwrap_or("-"),
            or_dash(&self.bus.plate),
            or_dash(&self.bus.flight),
            gate.as_deref().unwrap_or("-"),
            self.status.label(),
            self.countdown,
            self.bus.pax,
            self.bus.id,
        )
    }
}

/// Full detail of one bus
pub struct BusDetail<'a>(pub BusView<'a>);

impl Serialize for BusDetail<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for BusDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = &self.0;
        let bus = view.bus;
        writeln!(f, "Bus: {}", bus.id)?;
        writeln!(f, "  Plate: {}", or_dash(&bus.plate))?;
        writeln!(f, "  Bus no: {}", or_dash(&bus.bus_no))?;
        writeln!(f, "  Flight: {}", or_dash(&bus.flight))?;
        writeln!(f, "  Passengers: {}", bus.pax)?;
        if let Some(visa) = bus.visa {
            writeln!(f, "  Visa: {}", label(&visa))?;
        }
        writeln!(f, "  Departure: {}", bus.departure.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            "  Status: {} ({:.1}h, {})",
            view.status.label(),
            view.hours_left,
            view.countdown
        )?;
        match bus.spot {
            Some(spot) => writeln!(f, "  Spot: {}", spot)?,
            None => writeln!(f, "  Spot: -")?,
        }
        match bus.gate {
            Some(gate) => writeln!(f, "  Gate: {}", gate)?,
            None => writeln!(f, "  Gate: -")?,
        }
        let stages: Vec<String> = bus.forms.completed().iter().map(|s| s.to_string()).collect();
        write!(f, "  Stages: {}", stages.join(", "))
    }
}

pub struct AlertLine<'a>(pub &'a Alert);

impl Serialize for AlertLine<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for AlertLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alert = self.0;
        write!(
            f,
            "{} [{}] {}: {}",
            alert.time, alert.kind, alert.title, alert.message
        )
    }
}

fn counts(c: &ClassCounts) -> String {
    format!("early {} / on time {} / late {}", c.early, c.ontime, c.late)
}

pub struct BoardView<'a>(pub &'a BoardSummary);

impl Serialize for BoardView<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        writeln!(f, "Shift {}", b.shift)?;
        writeln!(f, "Buses: {} ({})", b.total, counts(&b.counts))?;
        writeln!(f, "Passengers: {} (avg {})", b.pax, b.avg_pax)?;
        writeln!(f, "Flights: {}", b.flights)?;
        writeln!(f, "On-time rate: {}%", b.on_time_rate_pct)?;
        writeln!(
            f,
            "Occupancy: {}% ({} parked, {} free, peak {}%)",
            b.occupancy_pct, b.parked, b.free_spots, b.peak_occupancy_pct
        )?;
        writeln!(f, "Visas:")?;
        for v in &b.visas {
            writeln!(f, "  {:<8} {:>3} buses {:>5} pax", label(&v.visa), v.buses, v.pax)?;
        }
        write!(f, "Gates:")?;
        for g in &b.gates {
            write!(f, "\n  {:<3} {:>3} buses  {}", g.gate, g.buses, counts(&g.counts))?;
        }
        Ok(())
    }
}

pub struct ThresholdsView(pub Thresholds);

impl Serialize for ThresholdsView {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for ThresholdsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "early: {}h\nlate: {}h", self.0.early, self.0.late)
    }
}

pub struct SettingsView<'a>(pub &'a Settings);

impl Serialize for SettingsView<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

impl fmt::Display for SettingsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "{}", ThresholdsView(s.thresholds))?;
        writeln!(f, "sound: {}", on_off(s.settings.sound))?;
        writeln!(f, "notif: {}", on_off(s.settings.notif))?;
        writeln!(f, "autoRefresh: {}", on_off(s.settings.auto_refresh))?;
        write!(f, "spotSize: {}", s.spot_size)
    }
}
