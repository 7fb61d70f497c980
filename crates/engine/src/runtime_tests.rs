// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

use super::*;
use chrono::TimeDelta;
use yard_adapters::{FakeNotifyAdapter, FakeSoundAdapter};
use yard_core::{AlertKind, FakeClock, Gate, SequentialIdGen, Settings, SpotError, SNAPSHOT_KEY};
use yard_core::{RegistryError, Snapshot};
use yard_storage::MemoryKvStore;

type TestRuntime =
    Runtime<FakeNotifyAdapter, FakeSoundAdapter, MemoryKvStore, FakeClock, SequentialIdGen>;

struct Harness {
    notify: FakeNotifyAdapter,
    sound: FakeSoundAdapter,
    kv: MemoryKvStore,
    clock: FakeClock,
}

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-01T06:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

impl Harness {
    fn new() -> Self {
        Self {
            notify: FakeNotifyAdapter::new(),
            sound: FakeSoundAdapter::new(),
            kv: MemoryKvStore::new(),
            clock: FakeClock::at(t0()),
        }
    }

    fn runtime(&self) -> TestRuntime {
        Runtime::new(
            RuntimeDeps {
                notify: self.notify.clone(),
                sound: self.sound.clone(),
                store: StateStore::new(self.kv.clone()),
            },
            self.clock.clone(),
            SequentialIdGen::new("bus"),
            Intervals::default(),
        )
    }

    fn stored(&self) -> Snapshot {
        StateStore::new(self.kv.clone()).load_snapshot()
    }
}

fn check_in(plate: &str, hours_left: i64) -> RegistrationForm {
    RegistrationForm {
        bus_plate: Some(plate.to_string()),
        flight_no: Some("SV1001".into()),
        pax_count: Some(40),
        dep_time: Some((t0() + TimeDelta::hours(hours_left)).to_rfc3339()),
        ..Default::default()
    }
}

fn lounge(n: u16) -> SpotAssignmentForm {
    SpotAssignmentForm {
        park_no: Some(Spot::new(n).unwrap()),
        gate_no: Some(Gate::B1),
        ..Default::default()
    }
}

async fn register(runtime: &mut TestRuntime, plate: &str, hours_left: i64) -> BusId {
    match runtime
        .handle(Command::Register(check_in(plate, hours_left)))
        .await
        .unwrap()
    {
        Reply::Registered(id) => id,
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn register_notifies_and_persists() {
    let h = Harness::new();
    let mut runtime = h.runtime();

    let id = register(&mut runtime, "ABC-123", 9).await;
    assert_eq!(id, BusId::new("bus-1"));

    let calls = h.notify.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, NotifyKind::Success);
    assert_eq!(calls[0].title, "ScrSegregationIn");
    assert_eq!(
        calls[0].message,
        "Bus ABC-123 registered - assign a spot from the registered list"
    );

    let stored = h.stored();
    assert_eq!(stored.bus_data.len(), 1);
    assert_eq!(stored.bus_data[0].plate, "ABC-123");
    assert_eq!(stored.daily_stats.map(|s| s.buses), Some(1));
}

#[tokio::test]
async fn full_lifecycle_moves_bus_to_departed_history() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    let id = register(&mut runtime, "ABC-123", 9).await;

    let reply = runtime
        .handle(Command::AssignSpot {
            id: id.clone(),
            form: lounge(12),
        })
        .await
        .unwrap();
    assert_eq!(reply, Reply::Assigned(Spot::new(12).unwrap()));

    runtime
        .handle(Command::ReleaseSpot {
            id: id.clone(),
            form: SpotReleaseForm::default(),
        })
        .await
        .unwrap();
    runtime
        .handle(Command::Depart {
            id: id.clone(),
            form: DepartureForm::default(),
        })
        .await
        .unwrap();

    let registry = runtime.yard().registry();
    assert!(registry.get(&id).is_none());
    assert_eq!(registry.departed()[0].id, id);
    assert_eq!(h.stored().departed_buses[0].id, id);
    assert_eq!(
        h.notify.calls().last().map(|c| c.message.clone()),
        Some("Bus departure registered".to_string())
    );
}

#[tokio::test]
async fn rejected_command_reports_error_and_changes_nothing() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    let first = register(&mut runtime, "A-1", 9).await;
    let second = register(&mut runtime, "B-2", 9).await;
    runtime
        .handle(Command::AssignSpot {
            id: first.clone(),
            form: lounge(5),
        })
        .await
        .unwrap();
    let before = runtime.yard().snapshot();

    let err = runtime
        .handle(Command::AssignSpot {
            id: second,
            form: lounge(5),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Rejected(YardError::Registry(RegistryError::Spot(
            SpotError::Occupied { .. }
        )))
    ));
    assert_eq!(runtime.yard().snapshot(), before);
    let errors = h.notify.of_kind(NotifyKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Error");
    assert_eq!(errors[0].message, err.to_string());
}

#[tokio::test]
async fn tick_command_raises_alerts_and_sounds_on_critical() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    runtime
        .handle(Command::ToggleSetting(Toggle::Sound))
        .await
        .unwrap();
    register(&mut runtime, "ABC-123", 9).await;

    let mut kinds = Vec::new();
    for hours_left in [9.0, 5.0, 2.0, 0.5, 0.5] {
        h.clock
            .set(t0() + TimeDelta::seconds(((9.0 - hours_left) * 3600.0) as i64));
        match runtime.handle(Command::Tick).await.unwrap() {
            Reply::Alerts(alerts) => kinds.extend(alerts.into_iter().map(|a| a.kind)),
            other => panic!("unexpected reply {other:?}"),
        }
    }

    assert_eq!(
        kinds,
        vec![AlertKind::Info, AlertKind::Warning, AlertKind::Critical]
    );
    assert_eq!(h.sound.plays(), 1);
    assert_eq!(runtime.yard().alerts().len(), 3);
    assert_eq!(
        h.notify
            .of_kind(NotifyKind::Error)
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Critically Late Bus"]
    );
    // Cached monitor state survives a restart
    assert!(h.stored().bus_data[0].previous_status.is_some());
}

#[tokio::test]
async fn settings_commands_persist_settings() {
    let h = Harness::new();
    let mut runtime = h.runtime();

    let reply = runtime
        .handle(Command::SetThresholds {
            early: 6.0,
            late: 2.0,
        })
        .await
        .unwrap();
    assert_eq!(reply, Reply::Thresholds(Thresholds::new(6.0, 2.0).unwrap()));

    let reply = runtime
        .handle(Command::ToggleSetting(Toggle::Notif))
        .await
        .unwrap();
    assert_eq!(
        reply,
        Reply::Toggled {
            toggle: Toggle::Notif,
            enabled: false
        }
    );

    let reloaded = h.runtime();
    assert_eq!(reloaded.yard().thresholds().early, 6.0);
    assert!(!reloaded.yard().settings().settings.notif);

    let err = runtime
        .handle(Command::SetThresholds {
            early: f64::NAN,
            late: 2.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Rejected(YardError::Threshold(_))));
    assert_eq!(runtime.yard().thresholds().early, 6.0);
}

#[tokio::test]
async fn timers_fire_in_cycle_order_and_snapshot_on_period() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    register(&mut runtime, "ABC-123", 9).await;
    runtime.start_timers();

    h.clock.advance(std::time::Duration::from_secs(1));
    assert_eq!(
        runtime.run_due(h.clock.now()).await,
        vec![TimerKind::ClockRefresh, TimerKind::Monitor]
    );

    h.clock.set(t0() + TimeDelta::seconds(30));
    assert_eq!(
        runtime.run_due(h.clock.now()).await,
        vec![
            TimerKind::ClockRefresh,
            TimerKind::Monitor,
            TimerKind::Snapshot
        ]
    );
}

#[tokio::test]
async fn failing_timer_does_not_stop_the_cycle() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    register(&mut runtime, "ABC-123", 9).await;
    runtime.start_timers();
    h.notify.set_failing(true);

    // Seed, then cross into on-time so the monitor notifies and fails
    h.clock.advance(std::time::Duration::from_secs(1));
    runtime.run_due(h.clock.now()).await;
    h.clock.set(t0() + TimeDelta::hours(4));
    let fired = runtime.run_due(h.clock.now()).await;

    assert!(fired.contains(&TimerKind::Monitor));
    assert!(fired.contains(&TimerKind::Snapshot));
    assert_eq!(runtime.yard().alerts().len(), 1);
    assert!(h.stored().bus_data[0].previous_status.is_some());
}

#[tokio::test]
async fn state_survives_restart() {
    let h = Harness::new();
    {
        let mut runtime = h.runtime();
        let id = register(&mut runtime, "ABC-123", 9).await;
        runtime
            .handle(Command::AssignSpot { id, form: lounge(44) })
            .await
            .unwrap();
    }

    let runtime = h.runtime();
    let registry = runtime.yard().registry();
    assert_eq!(registry.buses().len(), 1);
    assert!(!registry.spots().is_free(Spot::new(44).unwrap()));
    assert_eq!(runtime.board().parked, 1);
}

#[tokio::test]
async fn run_stops_on_cancel_and_writes_a_final_snapshot() {
    let h = Harness::new();
    let mut runtime = h.runtime();
    let cancel = CancellationToken::new();
    cancel.cancel();

    runtime.run(cancel).await.unwrap();

    assert!(h.kv.get(SNAPSHOT_KEY).unwrap().is_some());
    assert!(!runtime.scheduler().has_timers());
}

#[tokio::test]
async fn fresh_store_starts_empty() {
    let h = Harness::new();
    let runtime = h.runtime();
    assert!(runtime.yard().registry().buses().is_empty());
    assert_eq!(runtime.yard().settings(), &Settings::default());
}
