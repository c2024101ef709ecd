//! The logout interceptor.
//!
//! Clicking the logout link never follows it. The click is swallowed and the
//! logout form is submitted instead. The form is looked up on every click,
//! not when the listener is attached, so a form rendered after the link still
//! works.
//!
//! When the form can't be found or submitted, the click has already been
//! swallowed; the failure is logged and the click does nothing.

use crate::config::InterceptorConfig;
use crate::dom::{ClickEvent, Element, Form, FormMethod, Listener, Page};
use crate::error::{Error, Result};

use tracing::{debug, error, warn};

/// Set on a link for as long as its clicks are intercepted.
///
/// A link carrying it is never intercepted a second time, so every click
/// submits the form once no matter how often the interceptor is installed.
pub const INTERCEPTED_ATTRIBUTE: &str = "data-logout-intercepted";

/// The handle returned by installing on a page `P`.
pub type Installation<P> = Installed<<P as Page>::Element>;

/// The form type of a page `P`.
type FormOf<P> = <<P as Page>::Element as Element>::Form;

/// Intercepts clicks on a logout link and submits a logout form instead.
#[derive(Clone, Debug)]
pub struct LogoutInterceptor<P> {
    page: P,
    config: InterceptorConfig,
}

impl<P> LogoutInterceptor<P>
where
    P: Page,
{
    /// Creates a new `LogoutInterceptor` for a page.
    pub fn new(page: P, config: InterceptorConfig) -> LogoutInterceptor<P> {
        LogoutInterceptor { page, config }
    }

    /// The config the interceptor was created with.
    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Attaches the click handler to the logout link.
    ///
    /// Returns `Ok(None)` without doing anything if the page has no logout
    /// link, or if the link is already intercepted, so this is safe to run
    /// more than once and on every page. The returned [`Installed`] must be
    /// kept alive for the handler to stay attached.
    pub fn install(self) -> Result<Option<Installation<P>>> {
        let link_id = self.config.link_id().to_owned();

        let Some(link) = self.page.find_element(&link_id) else {
            debug!("no element with id `{}`, not intercepting logout", link_id);
            return Ok(None);
        };

        if link.has_attribute(INTERCEPTED_ATTRIBUTE) {
            debug!("`{}` is already intercepted", link_id);
            return Ok(None);
        }

        let listener = link
            .on_click(move |event| {
                if let Err(err) = self.handle_click(event) {
                    error!("logout aborted: {}", err);
                }
            })
            .map_err(|reason| Error::Listen {
                id: link_id.clone(),
                reason,
            })?;

        // dropping `listener` on failure detaches it again
        link.set_attribute(INTERCEPTED_ATTRIBUTE, "")
            .map_err(|reason| Error::Listen {
                id: link_id.clone(),
                reason,
            })?;

        debug!("intercepting clicks on `{}`", link_id);
        Ok(Some(Installed {
            link,
            listener: Some(listener),
        }))
    }

    /// Handles a single click on the logout link.
    ///
    /// The default action is always prevented, even when this fails.
    pub fn handle_click(&self, event: &dyn ClickEvent) -> Result<()> {
        event.prevent_default();

        let form = self.resolve_form()?;
        let form_id = self.config.form_id();

        let method = form.form_method();
        if method != FormMethod::Post {
            warn!(
                "form `{}` submits with `{}`, logout will not be a POST",
                form_id,
                method.as_str()
            );
        }

        form.submit_form().map_err(|reason| Error::Submit {
            id: form_id.to_owned(),
            reason,
        })?;

        debug!(
            "submitted `{}` ({} {})",
            form_id,
            method.as_str(),
            form.form_action()
        );
        Ok(())
    }

    fn resolve_form(&self) -> Result<FormOf<P>> {
        let id = self.config.form_id();

        self.page
            .find_element(id)
            .ok_or_else(|| Error::MissingForm { id: id.to_owned() })?
            .into_form()
            .ok_or_else(|| Error::NotAForm { id: id.to_owned() })
    }
}

/// Installs a [`LogoutInterceptor`] on a page.
///
/// See [`LogoutInterceptor::install`].
pub fn initialize<P>(page: P, config: InterceptorConfig) -> Result<Option<Installation<P>>>
where
    P: Page,
{
    LogoutInterceptor::new(page, config).install()
}

/// An intercepted link.
///
/// Dropping this detaches the click handler and unmarks the link, so the
/// link can be intercepted again.
pub struct Installed<E>
where
    E: Element,
{
    link: E,
    listener: Option<E::Listener>,
}

impl<E> Installed<E>
where
    E: Element,
{
    /// Leaves the link intercepted for the rest of the page's life.
    pub fn forget(mut self) {
        if let Some(listener) = self.listener.take() {
            listener.forget();
        }
    }
}

impl<E> Drop for Installed<E>
where
    E: Element,
{
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            drop(listener);
            self.link.remove_attribute(INTERCEPTED_ATTRIBUTE);
        }
    }
}
