//! # SW Lifecycle
//!
//! Tracks the lifecycle of a service worker registered by a host application
//! and exposes its current status and last error to consumer code.
//!
//! The worker-registration subsystem reports progress through seven hooks
//! (`ready`, `registered`, `cached`, `updatefound`, `updated`, `offline`,
//! `error`). Each hook becomes a [`LifecycleEvent`], and [`reduce`] folds the
//! events into a single [`LifecycleRecord`]: a [`Status`], the most recent
//! [`RegistrationHandle`] and the most recent [`RegistrationError`].
//!
//! ## Layers
//!
//! - [`reduce`] / [`LifecycleReducer`]: the pure state machine
//! - [`SubscriptionManager`]: registers on activation, routes hooks into the
//!   reducer, unregisters on deactivation
//! - [`ServiceWorkerProvider`] / [`ProviderScope`]: scope-bound subscriptions
//!   for UI composition layers, read with [`use_service_worker`]
//!
//! ## Example
//!
//! ```
//! use sw_lifecycle::mocks::MockRegistrar;
//! use sw_lifecycle::{ProviderConfig, RegistrationHandle, ServiceWorkerProvider, Status};
//!
//! let registrar = MockRegistrar::new();
//! let provider = ServiceWorkerProvider::new(registrar.clone());
//! let scope = provider.mount(ProviderConfig::default());
//!
//! registrar.fire_registered(RegistrationHandle::new("/", "sw.js"));
//! assert_eq!(scope.record().status, Status::Registered);
//!
//! registrar.fire_offline();
//! assert_eq!(scope.record().status, Status::Offline);
//! ```

pub mod actions;
pub mod config;
pub mod constants;
pub mod error;
pub mod provider;
pub mod reducer;
pub mod registrar;
pub mod state;
pub mod subscription;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::LifecycleEvent;
pub use config::{ProviderConfig, RegistrationOptions};
pub use error::{RegistrationError, UnknownStatus};
pub use provider::{ProviderScope, ServiceWorkerProvider, use_service_worker};
pub use reducer::{LifecycleReducer, reduce};
pub use registrar::{LifecycleHooks, RegisterOptions, WorkerRegistrar};
pub use state::{LifecycleRecord, RegistrationHandle, Status};
pub use subscription::{LifecycleStore, SubscriptionHandle, SubscriptionId, SubscriptionManager};
