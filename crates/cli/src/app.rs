// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring: configuration, logging, state directory and the runtime

use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use yard_adapters::{ConsoleNotifier, TerminalBell, TracedNotifyAdapter, TracedSoundAdapter};
use yard_core::config::Intervals;
use yard_core::{BusId, SystemClock, UuidIdGen, Yard, YardConfig};
use yard_engine::{Runtime, RuntimeDeps};
use yard_storage::{FileKvStore, StateStore};

pub type YardRuntime = Runtime<
    TracedNotifyAdapter<ConsoleNotifier>,
    TracedSoundAdapter<TerminalBell>,
    FileKvStore,
    SystemClock,
    UuidIdGen,
>;

const STATE_DIR_ENV: &str = "YARD_STATE_DIR";

/// Load the config file, or the default location when none is given
pub fn load_config(path: Option<&Path>) -> Result<YardConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match dirs::config_dir() {
            Some(dir) => dir.join("yard").join("config.toml"),
            None => return Ok(YardConfig::default()),
        },
    };
    Ok(YardConfig::load(&path)?)
}

/// `RUST_LOG` wins over the configured filter; logs go to stderr
pub fn setup_logging(config: &YardConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `--state-dir`, then `YARD_STATE_DIR`, then the config file, then the
/// platform data directory
pub fn resolve_state_dir(flag: Option<PathBuf>, config: &YardConfig) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(STATE_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = &config.state_dir {
        return Ok(dir.clone());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join("yard"))
        .ok_or_else(|| anyhow!("cannot determine a state directory; pass --state-dir"))
}

pub fn open_runtime(state_dir: &Path, intervals: Intervals) -> Result<YardRuntime> {
    let kv = FileKvStore::open(state_dir)
        .with_context(|| format!("opening state directory {}", state_dir.display()))?;
    tracing::debug!(dir = %state_dir.display(), "state directory opened");
    Ok(Runtime::new(
        RuntimeDeps {
            notify: TracedNotifyAdapter::new(ConsoleNotifier::new()),
            sound: TracedSoundAdapter::new(TerminalBell::new()),
            store: StateStore::new(kv),
        },
        SystemClock,
        UuidIdGen,
        intervals,
    ))
}

/// Find an active bus by id, or failing that by its plate
pub fn resolve_bus(yard: &Yard, key: &str) -> Result<BusId> {
    let registry = yard.registry();
    let id = BusId::new(key);
    if registry.get(&id).is_some() {
        return Ok(id);
    }
    let wanted = key.trim();
    let mut matches = registry
        .buses()
        .iter()
        .filter(|bus| bus.plate.eq_ignore_ascii_case(wanted));
    match (matches.next(), matches.next()) {
        (Some(bus), None) => Ok(bus.id.clone()),
        (Some(_), Some(_)) => bail!("plate {wanted} matches more than one bus; use the bus id"),
        (None, _) => bail!("no active bus with id or plate {wanted}"),
    }
}
