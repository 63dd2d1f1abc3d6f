//! Lifecycle events, one per registration callback.

use crate::constants::event_tags;
use crate::error::RegistrationError;
use crate::state::{RegistrationHandle, Status};

/// A lifecycle notification, as fed to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// `ready` callback.
    Ready(RegistrationHandle),
    /// `registered` callback.
    Registered(RegistrationHandle),
    /// `cached` callback.
    Cached(RegistrationHandle),
    /// `updatefound` callback.
    UpdateFound(RegistrationHandle),
    /// `updated` callback.
    Updated(RegistrationHandle),
    /// `offline` callback.
    Offline,
    /// `error` callback.
    Error(RegistrationError),
    /// An event tag this version does not know. Folding it is a no-op.
    Unrecognized {
        /// The tag as received.
        tag: String,
    },
}

impl LifecycleEvent {
    /// Wire tag of this event.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            LifecycleEvent::Ready(_) => event_tags::SERVICE_WORKER_READY,
            LifecycleEvent::Registered(_) => event_tags::SERVICE_WORKER_REGISTERED,
            LifecycleEvent::Cached(_) => event_tags::SERVICE_WORKER_CACHED,
            LifecycleEvent::UpdateFound(_) => event_tags::SERVICE_WORKER_UPDATE_FOUND,
            LifecycleEvent::Updated(_) => event_tags::SERVICE_WORKER_UPDATE_READY,
            LifecycleEvent::Offline => event_tags::SERVICE_WORKER_OFFLINE,
            LifecycleEvent::Error(_) => event_tags::SERVICE_WORKER_ERROR,
            LifecycleEvent::Unrecognized { tag } => tag,
        }
    }

    /// Status this event moves the record to, `None` for unrecognized events.
    #[must_use]
    pub const fn status(&self) -> Option<Status> {
        match self {
            LifecycleEvent::Ready(_) => Some(Status::Ready),
            LifecycleEvent::Registered(_) => Some(Status::Registered),
            LifecycleEvent::Cached(_) => Some(Status::Cached),
            LifecycleEvent::UpdateFound(_) => Some(Status::Updates),
            LifecycleEvent::Updated(_) => Some(Status::Updated),
            LifecycleEvent::Offline => Some(Status::Offline),
            LifecycleEvent::Error(_) => Some(Status::Error),
            LifecycleEvent::Unrecognized { .. } => None,
        }
    }

    /// Registration carried by the event, if any.
    #[must_use]
    pub const fn registration(&self) -> Option<&RegistrationHandle> {
        match self {
            LifecycleEvent::Ready(handle)
            | LifecycleEvent::Registered(handle)
            | LifecycleEvent::Cached(handle)
            | LifecycleEvent::UpdateFound(handle)
            | LifecycleEvent::Updated(handle) => Some(handle),
            LifecycleEvent::Offline
            | LifecycleEvent::Error(_)
            | LifecycleEvent::Unrecognized { .. } => None,
        }
    }

    /// Build an event from a wire tag.
    ///
    /// Registration-bearing tags need `registration`, the error tag needs
    /// `error`. A known tag missing its payload, or an unknown tag, yields
    /// `Unrecognized` so that folding it leaves the record untouched.
    #[must_use]
    pub fn from_tag(
        tag: &str,
        registration: Option<RegistrationHandle>,
        error: Option<RegistrationError>,
    ) -> Self {
        let event = match (tag, registration, error) {
            (event_tags::SERVICE_WORKER_READY, Some(handle), _) => Some(Self::Ready(handle)),
            (event_tags::SERVICE_WORKER_REGISTERED, Some(handle), _) => {
                Some(Self::Registered(handle))
            },
            (event_tags::SERVICE_WORKER_CACHED, Some(handle), _) => Some(Self::Cached(handle)),
            (event_tags::SERVICE_WORKER_UPDATE_FOUND, Some(handle), _) => {
                Some(Self::UpdateFound(handle))
            },
            (event_tags::SERVICE_WORKER_UPDATE_READY, Some(handle), _) => {
                Some(Self::Updated(handle))
            },
            (event_tags::SERVICE_WORKER_OFFLINE, _, _) => Some(Self::Offline),
            (event_tags::SERVICE_WORKER_ERROR, _, Some(error)) => Some(Self::Error(error)),
            _ => None,
        };
        event.unwrap_or_else(|| Self::Unrecognized {
            tag: tag.to_string(),
        })
    }
}
