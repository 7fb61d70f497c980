// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the yard's outward-facing sinks: notifications and the
//! audible alert cue

pub mod notify;
pub mod sound;
pub mod traced;

pub use notify::{ConsoleNotifier, NoOpNotifyAdapter, Notification, NotifyAdapter, NotifyError};
pub use sound::{NoOpSoundAdapter, SoundAdapter, SoundError, TerminalBell};
pub use traced::{TracedNotifyAdapter, TracedSoundAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use sound::FakeSoundAdapter;
