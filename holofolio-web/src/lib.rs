//! Browser-side interactivity for the holofolio portfolio page
//!
//! This crate provides the WASM entry point that wires the page (sidebar,
//! animated canvases, counters, project modal). The animation and content
//! models are plain Rust and run anywhere; only `dom`, `canvas2d`, `fetch`,
//! `logging` and `page` touch browser APIs.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod canvas2d;
pub mod catalog;
pub mod config;
pub mod counter;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod field;
pub mod frame;
pub mod logging;
pub mod markdown;
pub mod modal;
pub mod nav;
pub mod page;
pub mod schedule;
pub mod skills;

pub use error::{PortfolioError, PortfolioResult};

thread_local! {
    static PAGE: RefCell<Option<page::Page>> = const { RefCell::new(None) };
}

/// Initialize logging and the panic hook, then mount the page
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);

    match page::Page::mount() {
        Ok(mounted) => {
            // A second start replaces (and releases) the previous page
            let previous = PAGE.with(|slot| slot.borrow_mut().replace(mounted));
            if let Some(previous) = previous {
                previous.teardown();
            }
        }
        Err(err) => tracing::error!(%err, "page failed to mount"),
    }
}

/// Release every listener, timer and animation frame owned by the page
#[wasm_bindgen]
pub fn unmount() {
    if let Some(mounted) = PAGE.with(|slot| slot.borrow_mut().take()) {
        mounted.teardown();
    }
}

/// Convert documentation Markdown with the same rules the modal uses
#[wasm_bindgen]
pub fn render_markdown(text: &str) -> String {
    markdown::render(text)
}
