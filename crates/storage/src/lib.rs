// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! yard-storage: persistence for the bus yard
//!
//! A small key-value gateway ([`KvStore`]) with file and in-memory
//! backends, and [`StateStore`], which reads and writes the two persisted
//! blobs on top of it.

mod kv;
mod state;

pub use kv::{FileKvStore, KvStore, MemoryKvStore, StorageError};
pub use state::StateStore;
