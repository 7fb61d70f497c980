// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transient notification delivery

use async_trait::async_trait;
use std::io::Write;
use thiserror::Error;
use yard_core::NotifyKind;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifyAdapter, NotifyCall};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification failed: {0}")]
    Failed(String),
}

/// A notification to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotifyKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Adapter trait for notification delivery
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Prints notifications to stderr, one line each
#[derive(Clone, Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn format_line(notification: &Notification) -> String {
        format!(
            "[{}] {}: {}",
            notification.kind, notification.title, notification.message
        )
    }
}

#[async_trait]
impl NotifyAdapter for ConsoleNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let line = Self::format_line(&notification);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}").map_err(|e| NotifyError::Failed(e.to_string()))
    }
}

/// Discards notifications
#[derive(Clone, Debug, Default)]
pub struct NoOpNotifyAdapter;

impl NoOpNotifyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotifyAdapter for NoOpNotifyAdapter {
    async fn notify(&self, _notification: Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_line_shows_kind_title_and_message() {
        let n = Notification::new(
            NotifyKind::Warning,
            "Late Bus",
            "Bus X exceeded scheduled departure",
        );
        assert_eq!(
            ConsoleNotifier::format_line(&n),
            "[warning] Late Bus: Bus X exceeded scheduled departure"
        );
    }

    #[tokio::test]
    async fn noop_accepts_everything() {
        let n = Notification::new(NotifyKind::Info, "t", "m");
        assert!(NoOpNotifyAdapter::new().notify(n).await.is_ok());
    }
}
