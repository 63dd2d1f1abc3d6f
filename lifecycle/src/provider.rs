//! Scoped provider for UI composition layers.
//!
//! A [`ProviderScope`] owns one subscription for exactly as long as it lives.
//! Code inside the scope receives a reference to it and reads the record
//! with [`use_service_worker`]; there is no process-wide lookup.

use crate::actions::LifecycleEvent;
use crate::config::ProviderConfig;
use crate::registrar::WorkerRegistrar;
use crate::state::LifecycleRecord;
use crate::subscription::{SubscriptionHandle, SubscriptionManager};
use sw_lifecycle_runtime::StoreConfig;
use tokio::sync::{broadcast, watch};

/// Mounts provider scopes against one registration subsystem.
///
/// # Example
///
/// ```
/// use sw_lifecycle::{ProviderConfig, ServiceWorkerProvider, Status, use_service_worker};
/// use sw_lifecycle::mocks::MockRegistrar;
///
/// let provider = ServiceWorkerProvider::new(MockRegistrar::new());
/// let scope = provider.mount(ProviderConfig::default());
/// assert_eq!(use_service_worker(Some(&scope)).status, Status::Register);
/// drop(scope); // unregisters
/// ```
#[derive(Debug, Clone)]
pub struct ServiceWorkerProvider {
    manager: SubscriptionManager,
}

impl ServiceWorkerProvider {
    /// Provider over the given registration subsystem.
    #[must_use]
    pub fn new<G>(registrar: G) -> Self
    where
        G: WorkerRegistrar + 'static,
    {
        Self {
            manager: SubscriptionManager::new(registrar),
        }
    }

    /// Provider over an existing manager.
    #[must_use]
    pub const fn from_manager(manager: SubscriptionManager) -> Self {
        Self { manager }
    }

    /// Store configuration for every scope mounted from now on.
    #[must_use]
    pub fn with_store_config(self, config: StoreConfig) -> Self {
        Self {
            manager: self.manager.with_store_config(config),
        }
    }

    /// Activate a subscription bound to the returned scope.
    #[must_use]
    pub fn mount(&self, config: ProviderConfig) -> ProviderScope {
        let ProviderConfig {
            resource,
            registration_options,
        } = config;
        ProviderScope {
            subscription: self.manager.activate(&resource, registration_options),
        }
    }
}

/// A mounted provider. Dropping it deactivates the subscription.
#[derive(Debug)]
pub struct ProviderScope {
    subscription: SubscriptionHandle,
}

impl ProviderScope {
    /// Current record.
    #[must_use]
    pub fn record(&self) -> LifecycleRecord {
        self.subscription.record()
    }

    /// Receiver notified after every applied event.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<LifecycleRecord> {
        self.subscription.watch()
    }

    /// Receiver of every event applied from now on.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.subscription.events()
    }

    /// The underlying subscription.
    #[must_use]
    pub const fn subscription(&self) -> &SubscriptionHandle {
        &self.subscription
    }

    /// Whether the subscription is still applying events.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    /// End the scope now.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for ProviderScope {
    fn drop(&mut self) {
        self.subscription.deactivate();
    }
}

/// Read the lifecycle record visible from `scope`.
///
/// Outside an active scope (no scope, or one whose subscription has been
/// deactivated) this is the initial `register` record.
#[must_use]
pub fn use_service_worker(scope: Option<&ProviderScope>) -> LifecycleRecord {
    match scope {
        Some(scope) if scope.is_mounted() => scope.record(),
        _ => LifecycleRecord::default(),
    }
}
