//! Boundary with the worker-registration subsystem.
//!
//! The subsystem installs, caches and updates the worker and reports progress
//! through seven named hooks. The tracker hands it a [`LifecycleHooks`] set
//! on registration and asks it to unregister on teardown; everything else is
//! its business.

use crate::actions::LifecycleEvent;
use crate::config::RegistrationOptions;
use crate::error::RegistrationError;
use crate::state::RegistrationHandle;
use std::fmt;
use std::sync::Arc;

/// Hook receiving a registration.
pub type RegistrationHook = Arc<dyn Fn(RegistrationHandle) + Send + Sync>;

/// Hook receiving nothing.
pub type OfflineHook = Arc<dyn Fn() + Send + Sync>;

/// Hook receiving a registration failure.
pub type ErrorHook = Arc<dyn Fn(RegistrationError) + Send + Sync>;

/// The seven callback slots the registration subsystem invokes.
///
/// Each slot may be called any number of times, from any thread.
#[derive(Clone)]
pub struct LifecycleHooks {
    /// The active worker controls the page.
    pub ready: RegistrationHook,
    /// The worker script has been registered.
    pub registered: RegistrationHook,
    /// Content has been cached for offline use.
    pub cached: RegistrationHook,
    /// A new version is downloading.
    pub updatefound: RegistrationHook,
    /// A new version is installed and waiting.
    pub updated: RegistrationHook,
    /// No network connection.
    pub offline: OfflineHook,
    /// Registration failed.
    pub error: ErrorHook,
}

impl LifecycleHooks {
    /// Hooks that turn every callback into its [`LifecycleEvent`] and hand it
    /// to `dispatch`.
    #[must_use]
    pub fn dispatching_to<F>(dispatch: F) -> Self
    where
        F: Fn(LifecycleEvent) + Send + Sync + 'static,
    {
        let dispatch = Arc::new(dispatch);
        let bind = |make: fn(RegistrationHandle) -> LifecycleEvent| -> RegistrationHook {
            let dispatch = Arc::clone(&dispatch);
            Arc::new(move |handle| dispatch(make(handle)))
        };

        Self {
            ready: bind(LifecycleEvent::Ready),
            registered: bind(LifecycleEvent::Registered),
            cached: bind(LifecycleEvent::Cached),
            updatefound: bind(LifecycleEvent::UpdateFound),
            updated: bind(LifecycleEvent::Updated),
            offline: {
                let dispatch = Arc::clone(&dispatch);
                Arc::new(move || dispatch(LifecycleEvent::Offline))
            },
            error: {
                let dispatch = Arc::clone(&dispatch);
                Arc::new(move |error| dispatch(LifecycleEvent::Error(error)))
            },
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks").finish_non_exhaustive()
    }
}

/// Everything passed to [`WorkerRegistrar::register`].
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    /// Options for the subsystem, passed through unchanged.
    pub registration_options: RegistrationOptions,
    /// Callback slots.
    pub hooks: LifecycleHooks,
}

/// The worker-registration subsystem.
///
/// Implementations must not call hooks synchronously from inside
/// `unregister`; hooks firing after `unregister` are allowed and ignored.
pub trait WorkerRegistrar: Send + Sync {
    /// Start registering `resource`. Must return without waiting for any hook.
    fn register(&self, resource: &str, options: RegisterOptions);

    /// Tear the registration down.
    ///
    /// # Errors
    ///
    /// Returns the subsystem's failure; callers log it and carry on.
    fn unregister(&self) -> Result<(), RegistrationError>;
}

impl<T: WorkerRegistrar + ?Sized> WorkerRegistrar for Arc<T> {
    fn register(&self, resource: &str, options: RegisterOptions) {
        (**self).register(resource, options);
    }

    fn unregister(&self) -> Result<(), RegistrationError> {
        (**self).unregister()
    }
}
