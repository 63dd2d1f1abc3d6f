//! # SW Lifecycle Testing
//!
//! Testing utilities and helpers for lifecycle reducers and stores.
//!
//! This crate provides:
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Tracing setup for tests
//! - Helpers for waiting on observed state
//!
//! ## Example
//!
//! ```ignore
//! use sw_lifecycle_testing::ReducerTest;
//!
//! ReducerTest::new(LifecycleReducer)
//!     .with_env(())
//!     .given_state(LifecycleRecord::default())
//!     .when_action(LifecycleEvent::Offline)
//!     .then_state(|record| assert_eq!(record.status, Status::Offline))
//!     .run();
//! ```


/// Test helpers and utilities
pub mod helpers {
    use std::sync::Once;
    use std::time::Duration;
    use tokio::sync::watch;

    static TRACING: Once = Once::new();

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// Honors `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        TRACING.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
            // Another harness may have set a global subscriber first.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .try_init();
        });
    }

    /// Wait until the observed state satisfies `predicate`
    ///
    /// Returns a clone of the first matching state, or `None` if the timeout
    /// elapses or the sender is dropped first.
    pub async fn wait_for_state<S, F>(
        rx: &mut watch::Receiver<S>,
        predicate: F,
        timeout: Duration,
    ) -> Option<S>
    where
        S: Clone,
        F: FnMut(&S) -> bool,
    {
        match tokio::time::timeout(timeout, rx.wait_for(predicate)).await {
            Ok(Ok(state)) => Some(S::clone(&state)),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, wait_for_state};
pub use reducer_test::ReducerTest;
