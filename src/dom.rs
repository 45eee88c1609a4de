//! Thin DOM helpers and event-listener subscriptions.
//!
//! The extra-info form is server-rendered markup, not a Yew tree, so its
//! handlers are attached with plain `addEventListener`. A [`Listener`] owns
//! one such handler and detaches it when dropped: holding the value *is* the
//! subscription.

use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{Element, Event, EventTarget};

use crate::error::OpayoError;

/// Page-level region for checkout messages.
pub const MESSAGES_SELECTOR: &str = "#messages";

/// One live `addEventListener` registration.
pub struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Subscribe `handler` to `event_type` events on `target`.
    pub fn new<F>(
        target: &EventTarget,
        event_type: &'static str,
        handler: F,
    ) -> Result<Self, OpayoError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
            .map_err(OpayoError::from_js)?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        // Removing a handler that is already gone is harmless.
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// First element matching `selector` anywhere in the document.
pub fn query(selector: &str) -> Result<Option<Element>, OpayoError> {
    gloo_utils::document()
        .query_selector(selector)
        .map_err(OpayoError::from_js)
}

/// First element matching `selector` below `root`, or a missing-element error.
pub fn require_within(root: &Element, selector: &str) -> Result<Element, OpayoError> {
    root.query_selector(selector)
        .map_err(OpayoError::from_js)?
        .ok_or_else(|| OpayoError::missing(selector))
}

/// All elements matching `selector` below `root`.
pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>, OpayoError> {
    let nodes = root.query_selector_all(selector).map_err(OpayoError::from_js)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Append server markup at the end of `<body>`.
pub fn append_to_body(markup: &str) -> Result<(), OpayoError> {
    gloo_utils::body()
        .insert_adjacent_html("beforeend", markup)
        .map_err(OpayoError::from_js)
}

/// Remove every element matching `selector`; returns how many went away.
pub fn remove_all(selector: &str) -> Result<usize, OpayoError> {
    let document = gloo_utils::document();
    let nodes = document
        .query_selector_all(selector)
        .map_err(OpayoError::from_js)?;
    let mut removed = 0;
    for node in (0..nodes.length()).filter_map(|i| nodes.item(i)) {
        if let Ok(element) = node.dyn_into::<Element>() {
            element.remove();
            removed += 1;
        }
    }
    Ok(removed)
}

/// Replace the contents of `#messages` with an error alert.
///
/// The text is set as text, never parsed as markup.
pub fn show_page_error(message: &str) -> Result<(), OpayoError> {
    let container =
        query(MESSAGES_SELECTOR)?.ok_or_else(|| OpayoError::missing(MESSAGES_SELECTOR))?;
    let alert = gloo_utils::document()
        .create_element("div")
        .map_err(OpayoError::from_js)?;
    alert.set_class_name("alert alert-error");
    alert.set_text_content(Some(message));
    container.set_inner_html("");
    container.append_child(&alert).map_err(OpayoError::from_js)?;
    Ok(())
}

/// Send the browser to `url`.
pub fn navigate_to(url: &str) -> Result<(), OpayoError> {
    gloo_utils::window()
        .location()
        .set_href(url)
        .map_err(OpayoError::from_js)
}
