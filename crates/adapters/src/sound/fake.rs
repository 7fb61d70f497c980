// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sound adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SoundAdapter, SoundError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts alert cues instead of playing them
#[derive(Clone, Default)]
pub struct FakeSoundAdapter {
    plays: Arc<AtomicUsize>,
}

impl FakeSoundAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SoundAdapter for FakeSoundAdapter {
    async fn play_alert(&self) -> Result<(), SoundError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
