//! Subscription lifecycle: register on activation, route every hook into the
//! reducer, unregister on deactivation.

use crate::actions::LifecycleEvent;
use crate::config::RegistrationOptions;
use crate::reducer::LifecycleReducer;
use crate::registrar::{LifecycleHooks, RegisterOptions, WorkerRegistrar};
use crate::state::LifecycleRecord;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};
use sw_lifecycle_runtime::{Store, StoreConfig};
use tokio::sync::{broadcast, watch};

/// Store holding one subscription's record.
pub type LifecycleStore = Store<LifecycleRecord, LifecycleEvent, (), LifecycleReducer>;

/// Where the hooks deliver events. Emptied on deactivation, so hooks the
/// subsystem keeps holding no longer reference the record.
type Route = Arc<Mutex<Option<LifecycleStore>>>;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a subscription, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn fresh() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Starts and stops subscriptions against one registration subsystem.
///
/// Each activation gets its own record; subscriptions never share state.
#[derive(Clone)]
pub struct SubscriptionManager {
    registrar: Arc<dyn WorkerRegistrar>,
    store_config: StoreConfig,
}

impl SubscriptionManager {
    /// Manager over the given registration subsystem.
    #[must_use]
    pub fn new<G>(registrar: G) -> Self
    where
        G: WorkerRegistrar + 'static,
    {
        Self::from_shared(Arc::new(registrar))
    }

    /// Manager over an already shared registration subsystem.
    #[must_use]
    pub fn from_shared(registrar: Arc<dyn WorkerRegistrar>) -> Self {
        Self {
            registrar,
            store_config: StoreConfig::default(),
        }
    }

    /// Store configuration used for every subscription.
    #[must_use]
    pub const fn with_store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = config;
        self
    }

    /// Start a subscription for `resource`.
    ///
    /// Registers with the subsystem exactly once and returns immediately
    /// with the record at `register`. Hooks fired afterwards update the
    /// record in place; hooks fired after [`SubscriptionHandle::deactivate`]
    /// are dropped.
    #[must_use]
    pub fn activate(
        &self,
        resource: &str,
        registration_options: RegistrationOptions,
    ) -> SubscriptionHandle {
        let id = SubscriptionId::fresh();
        let store = Store::with_config(
            LifecycleRecord::default(),
            LifecycleReducer::new(),
            (),
            self.store_config.clone(),
        );

        let route: Route = Arc::new(Mutex::new(Some(store.clone())));
        let routed = Arc::clone(&route);
        let hooks = LifecycleHooks::dispatching_to(move |event: LifecycleEvent| {
            let target = routed.lock().unwrap_or_else(PoisonError::into_inner).clone();
            let tag = event.tag().to_owned();
            if !target.is_some_and(|store| store.send(event).is_ok()) {
                tracing::debug!(subscription = %id, tag = %tag, "Ignoring lifecycle event after deactivation");
            }
        });

        tracing::info!(subscription = %id, resource, "Activating service worker subscription");
        self.registrar.register(
            resource,
            RegisterOptions {
                registration_options,
                hooks,
            },
        );

        SubscriptionHandle {
            id,
            resource: resource.to_owned(),
            store,
            route,
            registrar: Arc::clone(&self.registrar),
        }
    }

    /// Stop a subscription. Same as [`SubscriptionHandle::deactivate`].
    pub fn deactivate(&self, handle: &SubscriptionHandle) {
        handle.deactivate();
    }
}

impl fmt::Debug for SubscriptionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionManager")
            .field("store_config", &self.store_config)
            .finish_non_exhaustive()
    }
}

/// A live (or deactivated) subscription.
///
/// Dropping the handle does not unregister; use [`crate::ProviderScope`] for
/// scope-bound teardown.
pub struct SubscriptionHandle {
    id: SubscriptionId,
    resource: String,
    store: LifecycleStore,
    route: Route,
    registrar: Arc<dyn WorkerRegistrar>,
}

impl SubscriptionHandle {
    /// Identifier used in logs.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Worker script this subscription registered.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Current record.
    #[must_use]
    pub fn record(&self) -> LifecycleRecord {
        self.store.snapshot()
    }

    /// Read the current record through a closure.
    ///
    /// The closure gets a snapshot, so it may fire hooks (directly or through
    /// the subsystem) without blocking on the record.
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&LifecycleRecord) -> T,
    {
        self.store.state(f)
    }

    /// Receiver notified after every applied event.
    ///
    /// Do not hold a `borrow()` of it while a hook fires on the same thread:
    /// applying the event waits for that borrow to end.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<LifecycleRecord> {
        self.store.subscribe()
    }

    /// Receiver of every event applied from now on.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.store.subscribe_actions()
    }

    /// Whether events are still being applied.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.store.is_closed()
    }

    /// Stop applying events, release the hook bindings and unregister from
    /// the subsystem.
    ///
    /// Idempotent: only the first call unregisters. An unregister failure is
    /// logged and otherwise ignored. The record stays readable through this
    /// handle, frozen at its last value; hooks still held by the subsystem
    /// no longer keep it alive.
    pub fn deactivate(&self) {
        if !self.store.close() {
            tracing::debug!(subscription = %self.id, "Subscription already deactivated");
            return;
        }

        self.route.lock().unwrap_or_else(PoisonError::into_inner).take();

        if let Err(error) = self.registrar.unregister() {
            tracing::warn!(
                subscription = %self.id,
                error = %error,
                "Failed to unregister service worker"
            );
        }

        tracing::info!(subscription = %self.id, resource = %self.resource, "Deactivated service worker subscription");
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("resource", &self.resource)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
