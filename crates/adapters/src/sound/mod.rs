// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audible alert cue

use async_trait::async_trait;
use std::io::Write;
use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSoundAdapter;

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("alert sound unavailable: {0}")]
    Unavailable(String),
}

/// Adapter trait for the critical-alert sound
#[async_trait]
pub trait SoundAdapter: Clone + Send + Sync + 'static {
    async fn play_alert(&self) -> Result<(), SoundError>;
}

/// Rings the terminal bell on stderr
#[derive(Clone, Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SoundAdapter for TerminalBell {
    async fn play_alert(&self) -> Result<(), SoundError> {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| SoundError::Unavailable(e.to_string()))
    }
}

/// Stays silent
#[derive(Clone, Debug, Default)]
pub struct NoOpSoundAdapter;

impl NoOpSoundAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SoundAdapter for NoOpSoundAdapter {
    async fn play_alert(&self) -> Result<(), SoundError> {
        Ok(())
    }
}
