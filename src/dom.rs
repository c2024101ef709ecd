//! The slice of the DOM the interceptor needs.
//!
//! The interceptor only ever talks to these traits. [`crate::web`] implements
//! them over `web-sys`, and the tests implement them over an in-memory page.

/// A rendered page that elements can be looked up in by id.
///
/// Cloning a page must give another handle to the same page, since the click
/// handler keeps its own handle to look the form up later.
pub trait Page: Clone + 'static {
    type Element: Element;

    /// Finds the element with the id `id`, if there is one.
    fn find_element(&self, id: &str) -> Option<Self::Element>;
}

/// A non-owning handle to an element on a page.
pub trait Element: Sized {
    type Form: Form;
    type Listener: Listener;

    /// Narrows the element to a form, if it is one.
    fn into_form(self) -> Option<Self::Form>;

    /// Calls `handler` every time the element is clicked.
    fn on_click<F>(&self, handler: F) -> Result<Self::Listener, String>
    where
        F: FnMut(&dyn ClickEvent) + 'static;

    fn has_attribute(&self, name: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), String>;

    fn remove_attribute(&self, name: &str);
}

/// Keeps a click handler registered.
///
/// Dropping the listener unregisters the handler.
pub trait Listener {
    /// Leaves the handler registered for the rest of the page's life.
    fn forget(self);
}

/// A click that happened on an element.
pub trait ClickEvent {
    /// Stops the browser from doing what it would normally do with the click.
    fn prevent_default(&self);

    fn default_prevented(&self) -> bool;
}

/// A form element.
pub trait Form {
    /// The method the form submits with.
    fn form_method(&self) -> FormMethod;

    /// Where the form submits to.
    fn form_action(&self) -> String;

    /// Submits the form using its method and action.
    fn submit_form(&self) -> Result<(), String>;
}

/// The `method` of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
    Dialog,
}

impl FormMethod {
    /// Parses a `method` attribute.
    ///
    /// Browsers treat a missing or unknown method as `get`, so this does too.
    pub fn parse(method: &str) -> FormMethod {
        let method = method.trim();

        if method.eq_ignore_ascii_case("post") {
            FormMethod::Post
        } else if method.eq_ignore_ascii_case("dialog") {
            FormMethod::Dialog
        } else {
            FormMethod::Get
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Get => "get",
            FormMethod::Post => "post",
            FormMethod::Dialog => "dialog",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakePage;
    use super::FormMethod;

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_parse_form_method() {
        assert_eq!(FormMethod::parse("post"), FormMethod::Post);
        assert_eq!(FormMethod::parse(" POST "), FormMethod::Post);
        assert_eq!(FormMethod::parse("dialog"), FormMethod::Dialog);
        assert_eq!(FormMethod::parse("get"), FormMethod::Get);
    }

    #[test]
    fn test_parse_form_method_defaults_to_get() {
        assert_eq!(FormMethod::parse(""), FormMethod::Get);
        assert_eq!(FormMethod::parse("delete"), FormMethod::Get);
    }

    #[test]
    fn test_listener_added_during_click_detaches_itself() {
        let page = FakePage::new().with_div("menu");
        let first_hits = Rc::new(Cell::new(0));
        let late = Rc::new(RefCell::new(None));

        let _first = page.listen("menu", {
            let page = page.clone();
            let first_hits = first_hits.clone();
            let late = late.clone();
            move |_| {
                first_hits.set(first_hits.get() + 1);
                if late.borrow().is_none() {
                    *late.borrow_mut() = Some(page.listen("menu", |_| {}));
                }
            }
        });

        page.click("menu");
        assert_eq!(page.listener_count("menu"), 2);

        // detaching the late listener must leave the first one alone
        drop(late.borrow_mut().take());
        assert_eq!(page.listener_count("menu"), 1);

        page.click("menu");
        assert_eq!(first_hits.get(), 2);
    }
}
