//! Interceptor error types.

use thiserror::Error;

/// The main interceptor error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The logout form is not on the page.
    #[error("no element with id `{id}`")]
    MissingForm { id: String },
    /// The logout form id belongs to something other than a form.
    #[error("element `{id}` is not a form")]
    NotAForm { id: String },
    /// The form was found, but submitting it raised.
    #[error("failed to submit form `{id}`: {reason}")]
    Submit { id: String, reason: String },
    /// The click listener could not be attached to the link.
    #[error("failed to listen for clicks on `{id}`: {reason}")]
    Listen { id: String, reason: String },
    /// There is no window or document to install into.
    #[error("no document available")]
    NoDocument,
    /// The config passed in could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
