//! Lifecycle constants.
//!
//! Event tags, default resource name and the diagnostic messages emitted for
//! each transition.

/// Script loaded when no resource is configured.
pub const DEFAULT_RESOURCE: &str = "sw.js";

/// Event tags, one per registration callback.
pub mod event_tags {
    /// The active worker is controlling the page.
    pub const SERVICE_WORKER_READY: &str = "SERVICE_WORKER_READY";

    /// The worker script has been registered.
    pub const SERVICE_WORKER_REGISTERED: &str = "SERVICE_WORKER_REGISTERED";

    /// Content has been cached for offline use.
    pub const SERVICE_WORKER_CACHED: &str = "SERVICE_WORKER_CACHED";

    /// A new worker version is being downloaded.
    pub const SERVICE_WORKER_UPDATE_FOUND: &str = "SERVICE_WORKER_UPDATE_FOUND";

    /// A new worker version is installed and waiting.
    pub const SERVICE_WORKER_UPDATE_READY: &str = "SERVICE_WORKER_UPDATE_READY";

    /// No network connection; the app runs from cache.
    pub const SERVICE_WORKER_OFFLINE: &str = "SERVICE_WORKER_OFFLINE";

    /// Registration failed.
    pub const SERVICE_WORKER_ERROR: &str = "SERVICE_WORKER_ERROR";

    /// All known tags.
    pub const ALL: [&str; 7] = [
        SERVICE_WORKER_READY,
        SERVICE_WORKER_REGISTERED,
        SERVICE_WORKER_CACHED,
        SERVICE_WORKER_UPDATE_FOUND,
        SERVICE_WORKER_UPDATE_READY,
        SERVICE_WORKER_OFFLINE,
        SERVICE_WORKER_ERROR,
    ];
}

/// Diagnostic messages logged by the reducer.
pub mod messages {
    /// Logged for `ready`.
    pub const READY: &str = "Service worker is ready.";

    /// Logged for `registered`.
    pub const REGISTERED: &str = "Service worker has been registered.";

    /// Logged for `cached`.
    pub const CACHED: &str = "Content has been cached for offline use.";

    /// Logged for `updatefound`.
    pub const UPDATE_FOUND: &str = "New content is downloading.";

    /// Logged for `updated`.
    pub const UPDATED: &str = "New content is available; please refresh.";

    /// Logged for `offline`.
    pub const OFFLINE: &str = "No internet connection found. App is running in offline mode.";

    /// Logged (at warn) for `error`, followed by the error.
    pub const ERROR: &str = "Error during service worker registration:";
}
