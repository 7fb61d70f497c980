// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use crate::ExecuteError;
use thiserror::Error;
use yard_core::YardError;

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The operation was rejected and the yard is unchanged
    #[error(transparent)]
    Rejected(#[from] YardError),
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
}
