//! Provider configuration.
//!
//! Values come from the host application; nothing here is interpreted by the
//! lifecycle tracker itself.

use crate::constants::DEFAULT_RESOURCE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque options bag handed to the registration subsystem unchanged.
///
/// Typical keys are `scope`, `updateViaCache` and `type`, but the tracker
/// neither validates nor reads them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationOptions(Map<String, Value>);

impl RegistrationOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RegistrationOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// What a provider registers.
///
/// # Example
///
/// ```
/// use sw_lifecycle::ProviderConfig;
///
/// let config = ProviderConfig::from_json(r#"{ "resource": "/worker.js" }"#)?;
/// assert_eq!(config.resource, "/worker.js");
/// assert!(config.registration_options.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Worker script to register.
    ///
    /// Default: `"sw.js"`
    pub resource: String,

    /// Options passed through to the registration subsystem.
    ///
    /// Default: empty
    pub registration_options: RegistrationOptions,
}

impl ProviderConfig {
    /// Configuration for the given worker script, with empty options.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            registration_options: RegistrationOptions::default(),
        }
    }

    /// Set the registration options.
    #[must_use]
    pub fn with_registration_options(mut self, options: RegistrationOptions) -> Self {
        self.registration_options = options;
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RESOURCE)
    }
}
