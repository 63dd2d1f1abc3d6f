//! Mock worker registrar.

use crate::config::RegistrationOptions;
use crate::error::RegistrationError;
use crate::registrar::{LifecycleHooks, RegisterOptions, WorkerRegistrar};
use crate::state::RegistrationHandle;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    register_calls: Vec<String>,
    unregister_calls: usize,
    last_options: Option<RegistrationOptions>,
    hooks: Option<LifecycleHooks>,
    unregister_error: Option<RegistrationError>,
}

/// In-memory registrar for testing.
///
/// Keeps the hooks from the most recent `register` call. The `fire_*`
/// methods invoke them synchronously, the way a host event loop would
/// deliver a callback; firing before any registration does nothing.
///
/// Clones share state, so a test can keep one clone and hand the other to a
/// [`crate::SubscriptionManager`].
#[derive(Debug, Clone, Default)]
pub struct MockRegistrar {
    inner: Arc<Mutex<Inner>>,
}

impl MockRegistrar {
    /// Create a new mock registrar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `unregister` call fail with `error`.
    #[must_use]
    pub fn failing_unregister(self, error: RegistrationError) -> Self {
        self.lock().unregister_error = Some(error);
        self
    }

    /// Resources passed to `register`, in call order.
    #[must_use]
    pub fn register_calls(&self) -> Vec<String> {
        self.lock().register_calls.clone()
    }

    /// Number of `unregister` calls.
    #[must_use]
    pub fn unregister_calls(&self) -> usize {
        self.lock().unregister_calls
    }

    /// Options passed to the most recent `register` call.
    #[must_use]
    pub fn last_registration_options(&self) -> Option<RegistrationOptions> {
        self.lock().last_options.clone()
    }

    /// Fire the `ready` hook.
    pub fn fire_ready(&self, handle: RegistrationHandle) {
        if let Some(hooks) = self.hooks() {
            (hooks.ready)(handle);
        }
    }

    /// Fire the `registered` hook.
    pub fn fire_registered(&self, handle: RegistrationHandle) {
        if let Some(hooks) = self.hooks() {
            (hooks.registered)(handle);
        }
    }

    /// Fire the `cached` hook.
    pub fn fire_cached(&self, handle: RegistrationHandle) {
        if let Some(hooks) = self.hooks() {
            (hooks.cached)(handle);
        }
    }

    /// Fire the `updatefound` hook.
    pub fn fire_updatefound(&self, handle: RegistrationHandle) {
        if let Some(hooks) = self.hooks() {
            (hooks.updatefound)(handle);
        }
    }

    /// Fire the `updated` hook.
    pub fn fire_updated(&self, handle: RegistrationHandle) {
        if let Some(hooks) = self.hooks() {
            (hooks.updated)(handle);
        }
    }

    /// Fire the `offline` hook.
    pub fn fire_offline(&self) {
        if let Some(hooks) = self.hooks() {
            (hooks.offline)();
        }
    }

    /// Fire the `error` hook.
    pub fn fire_error(&self, error: RegistrationError) {
        if let Some(hooks) = self.hooks() {
            (hooks.error)(error);
        }
    }

    /// Clone of the hooks, so no lock is held while one runs.
    fn hooks(&self) -> Option<LifecycleHooks> {
        self.lock().hooks.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A test that panicked mid-call leaves the data intact.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl WorkerRegistrar for MockRegistrar {
    fn register(&self, resource: &str, options: RegisterOptions) {
        let mut inner = self.lock();
        inner.register_calls.push(resource.to_string());
        inner.last_options = Some(options.registration_options);
        inner.hooks = Some(options.hooks);
    }

    fn unregister(&self) -> Result<(), RegistrationError> {
        let mut inner = self.lock();
        inner.unregister_calls += 1;
        match &inner.unregister_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
