#[cfg(target_arch = "wasm32")]
use gloo::events::EventListenerOptions;
#[cfg(target_arch = "wasm32")]
use serde_json::json;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// The selector a same-page href points at; a bare `#` points nowhere.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let href = href.trim();
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// What a click on a same-page anchor does.
#[derive(Debug, PartialEq, Eq)]
pub struct AnchorClick<T> {
    pub prevent_default: bool,
    pub scroll_to: Option<T>,
}

impl<T> AnchorClick<T> {
    /// Default navigation is always suppressed, even when the fragment
    /// matches nothing on the page.
    pub fn resolve(href: Option<&str>, find: impl FnOnce(&str) -> Option<T>) -> Self {
        Self {
            prevent_default: true,
            scroll_to: href.and_then(fragment_selector).and_then(find),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn attach(page: &mut PageEffects) -> Result<(), JsValue> {
    let anchors = page.query_all(ANCHOR_SELECTOR)?;

    for anchor in &anchors {
        let document = page.document().clone();
        let link = anchor.clone();
        page.listen_with_options(
            anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let href = link.get_attribute("href");
                let click = AnchorClick::resolve(href.as_deref(), |selector| {
                    document.query_selector(selector).ok().flatten()
                });
                if click.prevent_default {
                    event.prevent_default();
                }
                if let Some(target) = click.scroll_to {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            },
        );
    }

    page.attached("smooth_scroll", json!({ "anchors": anchors.len() }));
    Ok(())
}
