//! Error types surfaced by the lifecycle tracker.

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by the worker-registration subsystem.
///
/// This is the only error kind consumers see. It is never returned from an
/// operation; it arrives through the `error` callback and is stored in the
/// lifecycle record.
///
/// Two errors compare equal when their messages are equal; the optional
/// source is carried along for `Error::source` but not compared.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RegistrationError {
    message: String,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl RegistrationError {
    /// Error with a message only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error value, keeping it reachable through `source()`.
    #[must_use]
    pub fn from_source<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: error.to_string(),
            source: Some(Arc::new(error)),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PartialEq for RegistrationError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for RegistrationError {}

impl From<&str> for RegistrationError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RegistrationError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A status name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown service worker status: {0}")]
pub struct UnknownStatus(pub String);
