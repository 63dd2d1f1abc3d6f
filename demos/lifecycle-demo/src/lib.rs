//! # Lifecycle Demo
//!
//! A simulated worker-registration subsystem that plays a scripted sequence
//! of lifecycle callbacks on a Tokio task, for driving a
//! [`ServiceWorkerProvider`](sw_lifecycle::ServiceWorkerProvider) without a
//! browser.
//!
//! ## Example
//!
//! ```no_run
//! use lifecycle_demo::SimulatedRegistrar;
//! use sw_lifecycle::{ProviderConfig, ServiceWorkerProvider};
//!
//! # async fn example() {
//! let provider = ServiceWorkerProvider::new(SimulatedRegistrar::typical());
//! let scope = provider.mount(ProviderConfig::default());
//! let mut rx = scope.watch();
//! while rx.changed().await.is_ok() {
//!     println!("status: {}", rx.borrow().status);
//! }
//! # }
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use sw_lifecycle::{RegisterOptions, RegistrationError, RegistrationHandle, WorkerRegistrar};
use tokio::task::JoinHandle;

/// One scripted callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// Fire `ready`.
    Ready,
    /// Fire `registered`.
    Registered,
    /// Fire `cached`.
    Cached,
    /// Fire `updatefound`.
    UpdateFound,
    /// Fire `updated`.
    Updated,
    /// Fire `offline`.
    Offline,
    /// Fire `error` with this message.
    Error(String),
}

/// Registrar that replays a script of `(delay, callback)` steps.
///
/// Each delay is measured from the previous step. `unregister` aborts the
/// script; steps not yet played are never fired.
#[derive(Debug, Clone)]
pub struct SimulatedRegistrar {
    script: Vec<(Duration, Callback)>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SimulatedRegistrar {
    /// Registrar playing `script`.
    #[must_use]
    pub fn new(script: Vec<(Duration, Callback)>) -> Self {
        Self {
            script,
            task: Arc::new(Mutex::new(None)),
        }
    }

    /// First install, then an update, then the network drops.
    #[must_use]
    pub fn typical() -> Self {
        let step = Duration::from_millis(200);
        Self::new(vec![
            (step, Callback::Registered),
            (step, Callback::Ready),
            (step, Callback::Cached),
            (step * 3, Callback::UpdateFound),
            (step, Callback::Updated),
            (step * 2, Callback::Offline),
        ])
    }

    /// Whether a script is still playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl WorkerRegistrar for SimulatedRegistrar {
    fn register(&self, resource: &str, options: RegisterOptions) {
        let scope = options
            .registration_options
            .get("scope")
            .and_then(|v| v.as_str())
            .unwrap_or("/")
            .to_string();
        let registration = RegistrationHandle::new(scope, resource);
        let hooks = options.hooks;
        let script = self.script.clone();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(resource, "No Tokio runtime available, simulated registration not started");
            return;
        };

        tracing::debug!(resource, steps = script.len(), "Starting simulated registration");
        let task = runtime.spawn(async move {
            for (delay, callback) in script {
                tokio::time::sleep(delay).await;
                match callback {
                    Callback::Ready => (hooks.ready)(registration.clone()),
                    Callback::Registered => (hooks.registered)(registration.clone()),
                    Callback::Cached => (hooks.cached)(registration.clone()),
                    Callback::UpdateFound => (hooks.updatefound)(registration.clone()),
                    Callback::Updated => (hooks.updated)(registration.clone()),
                    Callback::Offline => (hooks.offline)(),
                    Callback::Error(message) => (hooks.error)(RegistrationError::new(message)),
                }
            }
        });

        let previous = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn unregister(&self) -> Result<(), RegistrationError> {
        let task = self.task.lock().unwrap_or_else(PoisonError::into_inner).take();
        match task {
            Some(task) => {
                task.abort();
                tracing::debug!("Simulated registration stopped");
                Ok(())
            },
            None => Err(RegistrationError::new("no simulated registration in progress")),
        }
    }
}
