//! Small helpers over `web_sys` DOM access

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::{PortfolioError, PortfolioResult};

/// Class toggled on every element that has an open/active state
pub const ACTIVE: &str = "active";

pub fn window() -> PortfolioResult<Window> {
    web_sys::window().ok_or_else(|| PortfolioError::MissingElement("window".to_string()))
}

pub fn document() -> PortfolioResult<Document> {
    window()?
        .document()
        .ok_or_else(|| PortfolioError::MissingElement("document".to_string()))
}

/// Look up a required element by id and cast it
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> PortfolioResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PortfolioError::MissingElement(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| PortfolioError::MissingElement(format!("#{id} has the wrong element type")))
}

/// Look up a required element by CSS selector
pub fn query(document: &Document, selector: &str) -> PortfolioResult<Element> {
    document
        .query_selector(selector)?
        .ok_or_else(|| PortfolioError::MissingElement(selector.to_string()))
}

/// All elements matching a CSS selector, in document order
pub fn query_all(document: &Document, selector: &str) -> PortfolioResult<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Set or clear the `active` class
pub fn set_active(element: &Element, active: bool) {
    if let Err(err) = element.class_list().toggle_with_force(ACTIVE, active) {
        tracing::debug!(?err, "class toggle failed");
    }
}

/// Current viewport size in CSS pixels
pub fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

/// An event listener that stays registered until [`Listener::detach`]
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `event` on `target`
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> PortfolioResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Unregister the listener and release its closure
    pub fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
