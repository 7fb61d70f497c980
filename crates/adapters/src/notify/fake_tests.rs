// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_notify_records_calls() {
    let adapter = FakeNotifyAdapter::new();

    adapter
        .notify(Notification::new(NotifyKind::Success, "ScrCurbside", "Bus departure registered"))
        .await
        .unwrap();
    adapter
        .notify(Notification::new(NotifyKind::Error, "Error", "bus plate is required"))
        .await
        .unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].title, "ScrCurbside");
    assert_eq!(adapter.of_kind(NotifyKind::Error).len(), 1);
}

#[tokio::test]
async fn failing_fake_records_nothing() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_failing(true);
    let result = adapter
        .notify(Notification::new(NotifyKind::Info, "t", "m"))
        .await;
    assert!(result.is_err());
    assert!(adapter.calls().is_empty());
}
