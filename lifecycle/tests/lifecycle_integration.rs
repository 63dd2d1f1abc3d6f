//! End-to-end tests: mock registrar → subscription → reducer → readers.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use sw_lifecycle::mocks::MockRegistrar;
use sw_lifecycle::{
    LifecycleEvent, LifecycleRecord, ProviderConfig, RegistrationError, RegistrationHandle,
    RegistrationOptions, ServiceWorkerProvider, Status, SubscriptionManager, use_service_worker,
};
use sw_lifecycle_testing::{init_test_tracing, wait_for_state};

#[test]
fn registered_offline_error_scenario() {
    init_test_tracing();
    let registrar = MockRegistrar::new();
    let subscription = SubscriptionManager::new(registrar.clone())
        .activate("sw.js", RegistrationOptions::new());

    assert_eq!(subscription.record(), LifecycleRecord::default());

    let h = RegistrationHandle::new("/", "sw.js");
    registrar.fire_registered(h.clone());
    let record = subscription.record();
    assert_eq!(record.status, Status::Registered);
    assert_eq!(record.registration, Some(h.clone()));
    assert!(record.error.is_none());

    registrar.fire_offline();
    let record = subscription.record();
    assert_eq!(record.status, Status::Offline);
    assert_eq!(record.registration, Some(h.clone()));
    assert!(record.error.is_none());

    registrar.fire_error(RegistrationError::new("net"));
    let record = subscription.record();
    assert_eq!(record.status, Status::Error);
    assert_eq!(record.registration, Some(h));
    assert_eq!(record.error, Some(RegistrationError::new("net")));
}

#[test]
fn update_cycle_ends_updated() {
    let registrar = MockRegistrar::new();
    let subscription = SubscriptionManager::new(registrar.clone())
        .activate("sw.js", RegistrationOptions::new());
    let h1 = RegistrationHandle::new("/", "sw.js");

    registrar.fire_registered(h1.clone());
    registrar.fire_updatefound(h1.clone());
    registrar.fire_updated(h1.clone());

    let record = subscription.record();
    assert_eq!(record.status, Status::Updated);
    assert_eq!(record.registration, Some(h1));
    assert!(record.has_update());
}

#[test]
fn no_resurrection_after_deactivate() {
    let registrar = MockRegistrar::new();
    let provider = ServiceWorkerProvider::new(registrar.clone());
    let scope = provider.mount(ProviderConfig::default());
    let h = RegistrationHandle::new("/", "sw.js");
    registrar.fire_cached(h.clone());

    scope.subscription().deactivate();
    let frozen = scope.record();

    registrar.fire_ready(RegistrationHandle::new("/", "sw.js"));
    registrar.fire_updatefound(RegistrationHandle::new("/", "sw.js"));
    registrar.fire_offline();
    registrar.fire_error(RegistrationError::new("late"));

    assert_eq!(scope.record(), frozen);
    assert_eq!(frozen.status, Status::Cached);
    assert_eq!(frozen.registration, Some(h));
    assert_eq!(registrar.unregister_calls(), 1);

    drop(scope);
    assert_eq!(registrar.unregister_calls(), 1);
}

#[test]
fn reader_sees_default_outside_scope() {
    let registrar = MockRegistrar::new();
    {
        let scope = ServiceWorkerProvider::new(registrar.clone()).mount(ProviderConfig::default());
        registrar.fire_ready(RegistrationHandle::new("/", "sw.js"));
        assert_eq!(use_service_worker(Some(&scope)).status, Status::Ready);
    }
    assert_eq!(registrar.unregister_calls(), 1);
    assert_eq!(use_service_worker(None).status, Status::Register);
}

#[test]
fn hooks_fired_from_other_threads_all_apply() {
    let registrar = MockRegistrar::new();
    let subscription = SubscriptionManager::new(registrar.clone())
        .activate("sw.js", RegistrationOptions::new());
    let mut events = subscription.events();
    let handle = RegistrationHandle::new("/", "sw.js");

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let registrar = registrar.clone();
            let handle = handle.clone();
            thread::spawn(move || registrar.fire_updatefound(handle))
        })
        .collect();
    for t in threads {
        t.join().expect("hook thread panicked");
    }

    let mut applied = 0;
    while let Ok(event) = events.try_recv() {
        assert_eq!(event, LifecycleEvent::UpdateFound(handle.clone()));
        applied += 1;
    }
    assert_eq!(applied, 8);
    assert_eq!(subscription.record().status, Status::Updates);
}

#[test]
fn hook_fired_from_inside_a_reader_applies() {
    let registrar = MockRegistrar::new();
    let subscription = SubscriptionManager::new(registrar.clone())
        .activate("sw.js", RegistrationOptions::new());
    let h = RegistrationHandle::new("/", "sw.js");
    let (done_tx, done_rx) = mpsc::channel();

    let expected = h.clone();
    let reader = thread::spawn(move || {
        let fired = subscription.state(|record| {
            if record.status == Status::Register {
                registrar.fire_ready(h);
                true
            } else {
                false
            }
        });
        let _ = done_tx.send(fired);
        subscription
    });

    let fired = done_rx
        .recv_timeout(Duration::from_secs(3))
        .expect("hook fired inside a reader closure did not return");
    assert!(fired);

    let subscription = reader.join().expect("reader thread panicked");
    let record = subscription.record();
    assert_eq!(record.status, Status::Ready);
    assert_eq!(record.registration, Some(expected));
}

#[tokio::test]
async fn watchers_observe_transitions_from_a_background_task() {
    let registrar = MockRegistrar::new();
    let scope = ServiceWorkerProvider::new(registrar.clone()).mount(ProviderConfig::default());
    let mut rx = scope.watch();
    assert_eq!(rx.borrow().status, Status::Register);

    let firing = Arc::new(registrar);
    let background = Arc::clone(&firing);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        background.fire_registered(RegistrationHandle::new("/", "sw.js"));
        background.fire_cached(RegistrationHandle::new("/", "sw.js"));
    });

    let seen = wait_for_state(&mut rx, |r| r.status == Status::Cached, Duration::from_secs(2)).await;
    assert_eq!(seen.map(|r| r.status), Some(Status::Cached));
}

#[tokio::test]
async fn events_stream_reports_each_applied_event_in_order() {
    let registrar = MockRegistrar::new();
    let scope = ServiceWorkerProvider::new(registrar.clone()).mount(ProviderConfig::default());
    let mut events = scope.events();
    let h = RegistrationHandle::new("/", "sw.js");

    registrar.fire_ready(h.clone());
    registrar.fire_offline();
    registrar.fire_error(RegistrationError::new("net"));

    assert_eq!(events.recv().await.ok(), Some(LifecycleEvent::Ready(h)));
    assert_eq!(events.recv().await.ok(), Some(LifecycleEvent::Offline));
    assert_eq!(
        events.recv().await.ok(),
        Some(LifecycleEvent::Error(RegistrationError::new("net")))
    );
}
