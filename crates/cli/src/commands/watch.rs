// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground loop running the periodic tasks until Ctrl-C

use crate::app::YardRuntime;
use anyhow::Result;
use tokio_util::sync::CancellationToken;

pub async fn watch(mut runtime: YardRuntime) -> Result<()> {
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("interrupt received, shutting down"),
            Err(e) => tracing::error!(error = %e, "failed to listen for Ctrl-C"),
        }
        on_signal.cancel();
    });

    let board = runtime.board();
    eprintln!(
        "Watching {} buses ({} parked). Press Ctrl-C to stop.",
        board.total, board.parked
    );
    runtime.run(cancel).await?;
    Ok(())
}
