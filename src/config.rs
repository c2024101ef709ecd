//! Interceptor config.

use crate::error::Result;

use serde::{Deserialize, Serialize};

/// The id of the link that gets intercepted by default.
pub const DEFAULT_LINK_ID: &str = "logout-link";
/// The id of the form that gets submitted by default.
pub const DEFAULT_FORM_ID: &str = "logout-form";

/// Names the two elements the interceptor works with.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InterceptorConfig {
    link_id: String,
    form_id: String,
}

impl InterceptorConfig {
    /// Creates a new `InterceptorConfig` using the default ids.
    pub fn new() -> InterceptorConfig {
        InterceptorConfig::default()
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<InterceptorConfig> {
        serde_json::from_str(json).map_err(From::from)
    }

    /// The id of the link whose clicks get intercepted.
    pub fn link(self, id: impl Into<String>) -> Self {
        Self {
            link_id: id.into(),
            ..self
        }
    }

    /// The id of the form submitted in place of following the link.
    pub fn form(self, id: impl Into<String>) -> Self {
        Self {
            form_id: id.into(),
            ..self
        }
    }

    pub fn link_id(&self) -> &str {
        &self.link_id
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        InterceptorConfig {
            link_id: DEFAULT_LINK_ID.into(),
            form_id: DEFAULT_FORM_ID.into(),
        }
    }
}
