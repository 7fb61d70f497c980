// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use thiserror::Error;
use tracing::Instrument;
use yard_adapters::{Notification, NotifyAdapter, NotifyError, SoundAdapter};
use yard_core::{Effect, Yard};
use yard_storage::{KvStore, StateStore, StorageError};

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("notify error: {0}")]
    Notify(#[from] NotifyError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Executes effects using the configured adapters
pub struct Executor<N, S, K: KvStore> {
    notify: N,
    sound: S,
    store: StateStore<K>,
}

impl<N, S, K> Executor<N, S, K>
where
    N: NotifyAdapter,
    S: SoundAdapter,
    K: KvStore,
{
    pub fn new(notify: N, sound: S, store: StateStore<K>) -> Self {
        Self {
            notify,
            sound,
            store,
        }
    }

    pub fn store(&self) -> &StateStore<K> {
        &self.store
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect, yard: &Yard) -> Result<(), ExecuteError> {
        let span = tracing::info_span!("effect", effect = effect.name());

        async move {
            let start = std::time::Instant::now();
            let result = self.execute_inner(effect, yard).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms, "completed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute_inner(&self, effect: Effect, yard: &Yard) -> Result<(), ExecuteError> {
        match effect {
            Effect::Notify {
                kind,
                title,
                message,
            } => {
                self.notify
                    .notify(Notification::new(kind, title, message))
                    .await?;
            }
            Effect::PlaySound => {
                // No audio device is not a failure of the operation
                if let Err(e) = self.sound.play_alert().await {
                    tracing::debug!(error = %e, "alert cue skipped");
                }
            }
            Effect::SaveSnapshot => self.store.save_snapshot(&yard.snapshot())?,
            Effect::SaveSettings => self.store.save_settings(yard.settings())?,
        }
        Ok(())
    }

    /// Execute effects in order. A failing effect does not stop the ones
    /// after it; the first error is returned once all have run.
    pub async fn execute_all(&self, effects: Vec<Effect>, yard: &Yard) -> Result<(), ExecuteError> {
        let mut first_error = None;
        for effect in effects {
            if let Err(e) = self.execute(effect, yard).await {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
