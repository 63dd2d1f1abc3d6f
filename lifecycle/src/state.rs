//! Lifecycle state: the status enum, registration handles and the record
//! folded by the reducer.

use crate::error::{RegistrationError, UnknownStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Summary of where the worker is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Registration requested, nothing heard back yet.
    #[default]
    Register,
    /// The active worker controls the page.
    Ready,
    /// The worker script has been registered.
    Registered,
    /// Content has been cached for offline use.
    Cached,
    /// A new version is downloading.
    Updates,
    /// A new version is installed and waiting.
    Updated,
    /// No network connection.
    Offline,
    /// Registration failed.
    Error,
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 8] = [
        Status::Register,
        Status::Ready,
        Status::Registered,
        Status::Cached,
        Status::Updates,
        Status::Updated,
        Status::Offline,
        Status::Error,
    ];

    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Register => "register",
            Status::Ready => "ready",
            Status::Registered => "registered",
            Status::Cached => "cached",
            Status::Updates => "updates",
            Status::Updated => "updated",
            Status::Offline => "offline",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
struct RegistrationInfo {
    scope: String,
    script_url: String,
}

/// Shared reference to a worker registration owned by the registration
/// subsystem.
///
/// Cloning is cheap and yields the same registration. Equality is identity:
/// two handles are equal only if they come from the same `new` call, even if
/// scope and script match.
#[derive(Clone)]
pub struct RegistrationHandle(Arc<RegistrationInfo>);

impl RegistrationHandle {
    /// Handle for a registration covering `scope` and running `script_url`.
    #[must_use]
    pub fn new(scope: impl Into<String>, script_url: impl Into<String>) -> Self {
        Self(Arc::new(RegistrationInfo {
            scope: scope.into(),
            script_url: script_url.into(),
        }))
    }

    /// URL scope the registration controls.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.0.scope
    }

    /// Script the registration runs.
    #[must_use]
    pub fn script_url(&self) -> &str {
        &self.0.script_url
    }
}

impl PartialEq for RegistrationHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RegistrationHandle {}

impl fmt::Debug for RegistrationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationHandle")
            .field("scope", &self.0.scope)
            .field("script_url", &self.0.script_url)
            .finish()
    }
}

/// The unit of lifecycle state.
///
/// `registration` is only ever set by a registration-bearing event and
/// `error` only by an error event. The default value is the record every
/// subscription starts from.
///
/// `error` is not cleared when the worker recovers: after an error followed
/// by, say, `ready`, the record has `status == Ready` and still carries the
/// old error. Check [`LifecycleRecord::is_error`] (or `status`) to know
/// whether an error is current; `error.is_some()` only says one happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LifecycleRecord {
    /// Current status.
    pub status: Status,
    /// Most recent registration reported by the subsystem.
    pub registration: Option<RegistrationHandle>,
    /// Most recent registration failure, current or not.
    pub error: Option<RegistrationError>,
}

impl LifecycleRecord {
    /// Whether the last event was an error.
    ///
    /// Unlike `error.is_some()`, this turns false again on recovery.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// Whether the last event reported the network as unavailable.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.status == Status::Offline
    }

    /// Whether a new worker version is downloading or waiting.
    #[must_use]
    pub const fn has_update(&self) -> bool {
        matches!(self.status, Status::Updates | Status::Updated)
    }

    /// Whether the last event carried a live registration.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self.status,
            Status::Ready | Status::Registered | Status::Cached | Status::Updates | Status::Updated
        )
    }
}
