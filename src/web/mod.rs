//! Browser bindings.
//!
//! Implements the [`dom`](crate::dom) traits over `web-sys` and exports the
//! bundle's entrypoints to JavaScript.

mod console;

use crate::config::InterceptorConfig;
use crate::dom::{self, ClickEvent, FormMethod, Page};
use crate::error::{Error, Result};
use crate::interceptor::initialize;

use tracing::{debug, error};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;

use web_sys::{Document, Event, EventTarget, HtmlFormElement};

/// Installs the interceptor with the default ids when the bundle loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    install_tracing();

    if let Err(err) = install_with(InterceptorConfig::default()) {
        error!("failed to install logout interceptor: {}", err);
    }
}

/// Installs the interceptor with a JSON config.
///
/// Returns `true` if the link was found and is now intercepted. A link that
/// is already intercepted, including the default link [`start`] takes care
/// of, is left alone and gives `false`.
#[wasm_bindgen]
pub fn install(config: Option<String>) -> Result<bool, JsValue> {
    let config = match config {
        Some(json) => InterceptorConfig::from_json(&json).map_err(into_js)?,
        None => InterceptorConfig::default(),
    };

    install_with(config).map_err(into_js)
}

fn install_with(config: InterceptorConfig) -> Result<bool> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(Error::NoDocument)?;

    match initialize(document, config)? {
        Some(installed) => {
            // the link lives as long as the page does
            installed.forget();
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Sends `tracing` events to the browser console.
fn install_tracing() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let filter_layer = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    // a subscriber installed by the host page wins
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console::layer())
        .try_init();
}

fn into_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl Page for Document {
    type Element = web_sys::Element;

    fn find_element(&self, id: &str) -> Option<web_sys::Element> {
        Document::get_element_by_id(self, id)
    }
}

impl dom::Element for web_sys::Element {
    type Form = HtmlFormElement;
    type Listener = ClickListener;

    fn into_form(self) -> Option<HtmlFormElement> {
        self.dyn_into::<HtmlFormElement>().ok()
    }

    fn on_click<F>(&self, mut handler: F) -> Result<ClickListener, String>
    where
        F: FnMut(&dyn ClickEvent) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&event));
        let target: EventTarget = self.clone().into();

        target
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(describe)?;

        Ok(ClickListener {
            target,
            closure: Some(closure),
        })
    }

    fn has_attribute(&self, name: &str) -> bool {
        web_sys::Element::has_attribute(self, name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), String> {
        web_sys::Element::set_attribute(self, name, value).map_err(describe)
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(err) = web_sys::Element::remove_attribute(self, name) {
            debug!("failed to remove `{}`: {}", name, describe(err));
        }
    }
}

impl ClickEvent for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }

    fn default_prevented(&self) -> bool {
        Event::default_prevented(self)
    }
}

impl dom::Form for HtmlFormElement {
    fn form_method(&self) -> FormMethod {
        FormMethod::parse(&HtmlFormElement::method(self))
    }

    fn form_action(&self) -> String {
        HtmlFormElement::action(self)
    }

    fn submit_form(&self) -> Result<(), String> {
        HtmlFormElement::submit(self).map_err(describe)
    }
}

/// A click listener attached to an element.
///
/// Detaches the listener when dropped, unless [`dom::Listener::forget`] is
/// called.
pub struct ClickListener {
    target: EventTarget,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl dom::Listener for ClickListener {
    fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            {
                debug!("failed to detach click listener: {}", describe(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element as _, Form as _};
    use crate::interceptor::INTERCEPTED_ATTRIBUTE;

    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::*;

    use web_sys::EventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window()
            .and_then(|window| window.document())
            .unwrap()
    }

    fn append(tag: &str, id: &str) -> web_sys::Element {
        let document = document();
        let element = document.create_element(tag).unwrap();
        element.set_id(id);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    /// Dispatches a cancelable click, returning whether it was prevented.
    fn click(element: &web_sys::Element) -> bool {
        let init = EventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);

        let event = Event::new_with_event_init_dict("click", &init).unwrap();
        element.dispatch_event(&event).unwrap();
        event.default_prevented()
    }

    #[wasm_bindgen_test]
    fn test_find_element_narrows_to_form() {
        let form = append("form", "test-find-form");
        form.set_attribute("method", "POST").unwrap();
        append("div", "test-find-div");

        let page = document();

        let form = page.find_element("test-find-form").unwrap().into_form();
        assert_eq!(form.map(|form| form.form_method()), Some(FormMethod::Post));

        assert!(page.find_element("test-find-div").unwrap().into_form().is_none());
        assert!(page.find_element("test-find-nothing").is_none());
    }

    #[wasm_bindgen_test]
    fn test_form_without_method_is_get() {
        append("form", "test-get-form");

        let form = document()
            .find_element("test-get-form")
            .and_then(|element| element.into_form())
            .unwrap();

        assert_eq!(form.form_method(), FormMethod::Get);
    }

    #[wasm_bindgen_test]
    fn test_dropping_click_listener_detaches() {
        let div = append("div", "test-listener-div");
        let hits = Rc::new(Cell::new(0));

        let listener = div
            .on_click({
                let hits = hits.clone();
                move |event| {
                    event.prevent_default();
                    hits.set(hits.get() + 1);
                }
            })
            .unwrap();

        assert!(click(&div));
        assert_eq!(hits.get(), 1);

        drop(listener);

        assert!(!click(&div));
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_install_marks_link_once() {
        // no form on the page, so a click never submits anything
        let link = append("a", "test-install-link");
        let config = r#"{"link_id": "test-install-link", "form_id": "test-install-form"}"#;

        assert!(install(Some(config.into())).unwrap());
        assert!(link.has_attribute(INTERCEPTED_ATTRIBUTE));
        assert!(!install(Some(config.into())).unwrap());

        assert!(click(&link));
    }

    #[wasm_bindgen_test]
    fn test_install_without_link() {
        let config = r#"{"link_id": "test-absent-link"}"#;

        assert!(!install(Some(config.into())).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_install_rejects_bad_config() {
        assert!(install(Some("{".into())).is_err());
        assert!(install(Some(r#"{"link": "test-install-link"}"#.into())).is_err());
    }
}
