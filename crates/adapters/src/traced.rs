// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::notify::{Notification, NotifyAdapter, NotifyError};
use crate::sound::{SoundAdapter, SoundError};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any NotifyAdapter
#[derive(Clone)]
pub struct TracedNotifyAdapter<N> {
    inner: N,
}

impl<N> TracedNotifyAdapter<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for TracedNotifyAdapter<N> {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let span = tracing::info_span!(
            "notify",
            kind = %notification.kind,
            title = %notification.title
        );

        async move {
            // Precondition: something to show
            if notification.title.trim().is_empty() && notification.message.trim().is_empty() {
                tracing::error!("notification has no content");
                return Err(NotifyError::Failed("notification has no content".to_string()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.notify(notification).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "delivered"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "delivery failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any SoundAdapter
#[derive(Clone)]
pub struct TracedSoundAdapter<S> {
    inner: S,
}

impl<S> TracedSoundAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SoundAdapter> SoundAdapter for TracedSoundAdapter<S> {
    async fn play_alert(&self) -> Result<(), SoundError> {
        async move {
            let result = self.inner.play_alert().await;
            match &result {
                Ok(()) => tracing::info!("alert cue played"),
                // A missing sound device is not worth more than a warning
                Err(e) => tracing::warn!(error = %e, "alert cue failed"),
            }
            result
        }
        .instrument(tracing::info_span!("sound.alert"))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
