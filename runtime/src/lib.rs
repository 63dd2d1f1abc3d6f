//! # SW Lifecycle Runtime
//!
//! Runtime for the lifecycle reducers.
//!
//! This crate provides the Store that owns reducer state, applies actions,
//! and lets any number of readers observe the current state.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, applies actions
//! - **Observation**: `watch` receivers for state, `broadcast` receivers for actions
//! - **Close**: A closed store rejects every further action
//!
//! ## Example
//!
//! ```ignore
//! use sw_lifecycle_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Apply an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use sw_lifecycle_core::reducer::Reducer;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store has been closed and no longer applies actions
        ///
        /// Returned by `send()` after `close()`. The state visible to readers
        /// is frozen at whatever it was when the store closed.
        #[error("Store is closed")]
        Closed,
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use sw_lifecycle_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(64);
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of actions buffered for slow action observers
    ///
    /// Default: 16
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the action broadcast capacity
    ///
    /// A capacity of zero is bumped to one; the broadcast channel cannot be empty.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Ordering, Reducer, StoreConfig, StoreError};
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (inside a `watch` channel so readers can observe changes)
    /// 2. Reducer (transition logic)
    /// 3. Environment (injected dependencies)
    ///
    /// Actions are applied synchronously: when `send()` returns `Ok`, every
    /// reader already sees the new state. Concurrent senders serialize on the
    /// state lock, and `close()` takes the same lock, so no action can slip
    /// in after a close has returned.
    ///
    /// The reducer runs under the write lock of the `watch` channel. Readers
    /// going through [`Store::state`] or [`Store::snapshot`] never hold that
    /// lock while caller code runs, so they may send from inside the closure.
    /// A `watch::Ref` obtained from [`Store::subscribe`] must not be held
    /// across a `send()` on the same thread.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<watch::Sender<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        closed: Arc<AtomicBool>,
        /// Every applied action is broadcast to observers, in apply order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (state, _) = watch::channel(initial_state);
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(state),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                closed: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the state lock
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Notifies state and action observers
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Closed`] if the store has been closed. The
        /// action is dropped and the state is left untouched.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&self, action: A) -> Result<(), StoreError> {
            if self.closed.load(Ordering::Acquire) {
                return Err(self.reject());
            }

            tracing::trace!("Processing action");

            let mut applied = false;
            let reducer = &self.reducer;
            let environment = &self.environment;
            let closed = &self.closed;
            let action_broadcast = &self.action_broadcast;

            self.state.send_if_modified(|state| {
                // Re-checked under the lock: close() may have won the race.
                if closed.load(Ordering::Acquire) {
                    return false;
                }
                // No receivers is fine; observation is optional.
                let _ = action_broadcast.send(action.clone());
                reducer.reduce(state, action, environment);
                applied = true;
                true
            });

            if !applied {
                return Err(self.reject());
            }

            metrics::counter!("store.actions.total").increment(1);
            tracing::trace!("Reducer completed");

            Ok(())
        }

        /// Close the store
        ///
        /// After this returns, `send()` rejects every action. Readers keep
        /// seeing the last applied state. Returns `true` for the call that
        /// actually closed the store and `false` for any later call.
        pub fn close(&self) -> bool {
            let mut first = false;
            let closed = &self.closed;
            self.state.send_if_modified(|_| {
                first = !closed.swap(true, Ordering::AcqRel);
                false
            });
            if first {
                tracing::debug!("Store closed");
            }
            first
        }

        /// Whether `close()` has been called
        #[must_use]
        pub fn is_closed(&self) -> bool {
            self.closed.load(Ordering::Acquire)
        }

        /// Read current state via a closure
        ///
        /// The closure sees a snapshot taken before it runs; the state lock
        /// is released by then, so the closure may itself send actions.
        ///
        /// ```ignore
        /// let status = store.state(|s| s.status);
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
            S: Clone,
        {
            let snapshot = self.snapshot();
            f(&snapshot)
        }

        /// Clone of the current state
        #[must_use]
        pub fn snapshot(&self) -> S
        where
            S: Clone,
        {
            self.state.borrow().clone()
        }

        /// Subscribe to state changes
        ///
        /// The receiver starts at the current state and is notified after
        /// every applied action, even when the new state equals the old one.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.state.subscribe()
        }

        /// Subscribe to applied actions
        ///
        /// Receives a clone of every action applied after this call, in the
        /// order the reducer saw them. A receiver that falls more than the
        /// configured broadcast capacity behind gets `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        fn reject(&self) -> StoreError {
            tracing::debug!("Rejected action: store is closed");
            metrics::counter!("store.actions.rejected").increment(1);
            StoreError::Closed
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                closed: Arc::clone(&self.closed),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &*self.state.borrow())
                .field("closed", &self.closed.load(Ordering::Acquire))
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use store::Store;
