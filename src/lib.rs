//! Turns a logout link into a logout form submission.
//!
//! Following a link is a `GET`, and logging out over `GET` lets any page that
//! can embed an image log the user out. The page instead renders a form that
//! logs out over `POST`, and this crate makes clicking the link submit that
//! form.
//!
//! On `wasm32` the [`web`] module installs the interceptor when the bundle is
//! loaded. Everything else is target independent.

#![deny(unsafe_code)]

pub mod config;
pub mod dom;
pub mod error;
pub mod interceptor;
#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
pub mod web;

pub use config::InterceptorConfig;
pub use error::{Error, Result};
pub use interceptor::{initialize, Installed, LogoutInterceptor};
