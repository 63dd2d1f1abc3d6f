//! The lifecycle reducer.
//!
//! Folds lifecycle events into a [`LifecycleRecord`]. Every (record, event)
//! pair is accepted: the registration subsystem delivers callbacks
//! asynchronously and in no guaranteed order, so the current status never
//! gates a transition.

use crate::actions::LifecycleEvent;
use crate::constants::{event_tags, messages};
use crate::state::{LifecycleRecord, RegistrationHandle, Status};
use sw_lifecycle_core::reducer::Reducer;

/// Fold one event into a record.
///
/// Pure apart from diagnostics: one `info` line per known event (`warn` for
/// errors), one `debug` line for unrecognized events, which return the record
/// unchanged.
///
/// # Example
///
/// ```
/// use sw_lifecycle::{reduce, LifecycleEvent, LifecycleRecord, RegistrationHandle, Status};
///
/// let handle = RegistrationHandle::new("/", "sw.js");
/// let record = reduce(LifecycleRecord::default(), LifecycleEvent::Ready(handle.clone()));
/// assert_eq!(record.status, Status::Ready);
/// assert_eq!(record.registration, Some(handle));
/// ```
#[must_use]
pub fn reduce(mut record: LifecycleRecord, event: LifecycleEvent) -> LifecycleRecord {
    apply(&mut record, event);
    record
}

fn apply(record: &mut LifecycleRecord, event: LifecycleEvent) {
    match event {
        LifecycleEvent::Ready(handle) => {
            tracing::info!(scope = handle.scope(), "{}", messages::READY);
            replace_registration(record, Status::Ready, handle, event_tags::SERVICE_WORKER_READY);
        },
        LifecycleEvent::Registered(handle) => {
            tracing::info!(scope = handle.scope(), "{}", messages::REGISTERED);
            replace_registration(
                record,
                Status::Registered,
                handle,
                event_tags::SERVICE_WORKER_REGISTERED,
            );
        },
        LifecycleEvent::Cached(handle) => {
            tracing::info!(scope = handle.scope(), "{}", messages::CACHED);
            replace_registration(record, Status::Cached, handle, event_tags::SERVICE_WORKER_CACHED);
        },
        LifecycleEvent::UpdateFound(handle) => {
            tracing::info!(scope = handle.scope(), "{}", messages::UPDATE_FOUND);
            replace_registration(
                record,
                Status::Updates,
                handle,
                event_tags::SERVICE_WORKER_UPDATE_FOUND,
            );
        },
        LifecycleEvent::Updated(handle) => {
            tracing::info!(scope = handle.scope(), "{}", messages::UPDATED);
            replace_registration(
                record,
                Status::Updated,
                handle,
                event_tags::SERVICE_WORKER_UPDATE_READY,
            );
        },
        LifecycleEvent::Offline => {
            tracing::info!("{}", messages::OFFLINE);
            record.status = Status::Offline;
            count(event_tags::SERVICE_WORKER_OFFLINE);
        },
        LifecycleEvent::Error(error) => {
            tracing::warn!(error = %error, "{} {}", messages::ERROR, error);
            record.status = Status::Error;
            record.error = Some(error);
            count(event_tags::SERVICE_WORKER_ERROR);
        },
        LifecycleEvent::Unrecognized { tag } => {
            tracing::debug!(tag = %tag, "Ignoring unrecognized lifecycle event");
        },
    }
}

fn replace_registration(
    record: &mut LifecycleRecord,
    status: Status,
    handle: RegistrationHandle,
    tag: &'static str,
) {
    record.status = status;
    record.registration = Some(handle);
    count(tag);
}

fn count(tag: &'static str) {
    metrics::counter!("lifecycle.events", "event" => tag).increment(1);
}

/// [`reduce`] as a store reducer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleReducer;

impl LifecycleReducer {
    /// Create a new lifecycle reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for LifecycleReducer {
    type State = LifecycleRecord;
    type Action = LifecycleEvent;
    type Environment = ();

    fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
        apply(state, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrationError;

    fn handle() -> RegistrationHandle {
        RegistrationHandle::new("/", "sw.js")
    }

    #[test]
    fn registration_bearing_events_set_status_and_handle() {
        let cases: [(fn(RegistrationHandle) -> LifecycleEvent, Status); 5] = [
            (LifecycleEvent::Ready, Status::Ready),
            (LifecycleEvent::Registered, Status::Registered),
            (LifecycleEvent::Cached, Status::Cached),
            (LifecycleEvent::UpdateFound, Status::Updates),
            (LifecycleEvent::Updated, Status::Updated),
        ];

        for (make, expected) in cases {
            let h = handle();
            let record = reduce(LifecycleRecord::default(), make(h.clone()));
            assert_eq!(record.status, expected);
            assert_eq!(record.registration, Some(h));
            assert!(record.error.is_none());
        }
    }

    #[test]
    fn offline_keeps_registration() {
        let h = handle();
        let record = reduce(LifecycleRecord::default(), LifecycleEvent::Registered(h.clone()));
        let record = reduce(record, LifecycleEvent::Offline);
        assert_eq!(record.status, Status::Offline);
        assert_eq!(record.registration, Some(h));
    }

    #[test]
    fn error_sets_error_and_keeps_registration() {
        let h = handle();
        let record = reduce(LifecycleRecord::default(), LifecycleEvent::Ready(h.clone()));
        let record = reduce(record, LifecycleEvent::Error(RegistrationError::new("net")));
        assert_eq!(record.status, Status::Error);
        assert_eq!(record.registration, Some(h));
        assert_eq!(record.error, Some(RegistrationError::new("net")));
    }

    #[test]
    fn recovery_after_error_is_a_normal_transition() {
        let h = handle();
        let record = reduce(
            LifecycleRecord::default(),
            LifecycleEvent::Error(RegistrationError::new("net")),
        );
        let record = reduce(record, LifecycleEvent::Ready(h.clone()));
        assert_eq!(record.status, Status::Ready);
        assert_eq!(record.registration, Some(h));
        // error is left as-is by non-error events
        assert_eq!(record.error, Some(RegistrationError::new("net")));
    }

    #[test]
    fn unrecognized_is_identity() {
        let record = reduce(LifecycleRecord::default(), LifecycleEvent::Registered(handle()));
        let after = reduce(
            record.clone(),
            LifecycleEvent::Unrecognized {
                tag: "SERVICE_WORKER_PAUSED".into(),
            },
        );
        assert_eq!(after, record);
    }

    #[test]
    fn later_handle_replaces_earlier() {
        let first = handle();
        let second = handle();
        let record = reduce(LifecycleRecord::default(), LifecycleEvent::Registered(first));
        let record = reduce(record, LifecycleEvent::UpdateFound(second.clone()));
        assert_eq!(record.registration, Some(second));
    }

    #[test]
    fn store_reducer_matches_reduce() {
        let h = handle();
        let mut state = LifecycleRecord::default();
        LifecycleReducer::new().reduce(&mut state, LifecycleEvent::Cached(h.clone()), &());
        LifecycleReducer::new().reduce(&mut state, LifecycleEvent::Offline, &());

        let folded = reduce(
            reduce(LifecycleRecord::default(), LifecycleEvent::Cached(h)),
            LifecycleEvent::Offline,
        );
        assert_eq!(state, folded);
    }

    mod diagnostics {
        use super::*;
        use std::fmt::Write as _;
        use std::sync::{Arc, Mutex, PoisonError};
        use tracing::field::{Field, Visit};
        use tracing::{Event, Level, Subscriber};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Debug, Clone)]
        struct Diagnostic {
            level: Level,
            fields: String,
        }

        /// Collects every event emitted from this crate.
        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<Diagnostic>>>);

        struct FieldText(String);

        impl Visit for FieldText {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                let _ = write!(self.0, "{}={:?} ", field.name(), value);
            }
        }

        impl<S: Subscriber> Layer<S> for Capture {
            fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
                if !event.metadata().target().starts_with("sw_lifecycle") {
                    return;
                }
                let mut text = FieldText(String::new());
                event.record(&mut text);
                self.0
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Diagnostic {
                        level: *event.metadata().level(),
                        fields: text.0,
                    });
            }
        }

        fn reduce_captured(
            record: LifecycleRecord,
            event: LifecycleEvent,
        ) -> (LifecycleRecord, Vec<Diagnostic>) {
            let capture = Capture::default();
            let subscriber = tracing_subscriber::registry().with(capture.clone());
            let record = tracing::subscriber::with_default(subscriber, || reduce(record, event));
            let seen = capture.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
            (record, seen)
        }

        #[test]
        fn one_diagnostic_per_event_at_its_level() {
            let h = handle();
            let cases = vec![
                (LifecycleEvent::Ready(h.clone()), Level::INFO),
                (LifecycleEvent::Registered(h.clone()), Level::INFO),
                (LifecycleEvent::Cached(h.clone()), Level::INFO),
                (LifecycleEvent::UpdateFound(h.clone()), Level::INFO),
                (LifecycleEvent::Updated(h), Level::INFO),
                (LifecycleEvent::Offline, Level::INFO),
                (LifecycleEvent::Error(RegistrationError::new("net down")), Level::WARN),
                (
                    LifecycleEvent::Unrecognized {
                        tag: "SERVICE_WORKER_PAUSED".into(),
                    },
                    Level::DEBUG,
                ),
            ];

            for (event, level) in cases {
                let (_, seen) = reduce_captured(LifecycleRecord::default(), event.clone());
                assert_eq!(seen.len(), 1, "{event:?} emitted {seen:?}");
                assert_eq!(seen[0].level, level, "{event:?}");
            }
        }

        #[test]
        fn error_diagnostic_carries_the_error() {
            let (_, seen) = reduce_captured(
                LifecycleRecord::default(),
                LifecycleEvent::Error(RegistrationError::new("net down")),
            );
            assert_eq!(seen.len(), 1);
            assert!(seen[0].fields.contains("error=net down"), "{seen:?}");
        }

        #[test]
        fn diagnostics_do_not_change_the_record() {
            let h = handle();
            let start = reduce(LifecycleRecord::default(), LifecycleEvent::Registered(h.clone()));
            let events = [
                LifecycleEvent::UpdateFound(h),
                LifecycleEvent::Error(RegistrationError::new("net down")),
                LifecycleEvent::Offline,
            ];

            for event in events {
                let quiet = reduce(start.clone(), event.clone());
                let (observed, _) = reduce_captured(start.clone(), event);
                assert_eq!(observed, quiet);
            }
        }
    }
}
