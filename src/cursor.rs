#[cfg(target_arch = "wasm32")]
use serde_json::json;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, HtmlElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";
pub const CURSOR_RING_CLASS: &str = "custom-cursor";
pub const CURSOR_DOT_CLASS: &str = "cursor-dot";
pub const HOVER_CLASS: &str = "hover";
pub const HOVER_TARGET_SELECTOR: &str = "a, button, .card";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Coarse,
    Fine,
}

impl PointerKind {
    pub fn from_coarse_match(matches: bool) -> Self {
        if matches {
            Self::Coarse
        } else {
            Self::Fine
        }
    }

    /// Class names of the follower elements to append; touch devices get none.
    pub fn follower_classes(self) -> &'static [&'static str] {
        match self {
            Self::Coarse => &[],
            Self::Fine => &[CURSOR_RING_CLASS, CURSOR_DOT_CLASS],
        }
    }
}

pub fn follow_position(client_x: i32, client_y: i32) -> (String, String) {
    (format!("{client_x}px"), format!("{client_y}px"))
}

pub trait ClassToggle {
    fn toggle_class(&self, class: &str, force: bool);
}

#[cfg(target_arch = "wasm32")]
impl ClassToggle for HtmlElement {
    fn toggle_class(&self, class: &str, force: bool) {
        let _ = self.class_list().toggle_with_force(class, force);
    }
}

/// Only the ring grows on hover; the dot keeps following unchanged.
pub fn set_hover<T: ClassToggle>(followers: &[(&'static str, T)], hovering: bool) {
    for (class, follower) in followers {
        if *class == CURSOR_RING_CLASS {
            follower.toggle_class(HOVER_CLASS, hovering);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn attach(page: &mut PageEffects) -> Result<(), JsValue> {
    let coarse = page
        .window()
        .match_media(COARSE_POINTER_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    let classes = PointerKind::from_coarse_match(coarse).follower_classes();
    if classes.is_empty() {
        page.skipped("cursor", "coarse_pointer");
        return Ok(());
    }

    let mut followers = Vec::with_capacity(classes.len());
    for class in classes {
        let follower = page
            .document()
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        follower.set_class_name(class);
        page.body().append_child(&follower)?;
        followers.push((*class, follower));
    }
    let followers = Rc::new(followers);

    let on_move = {
        let followers = Rc::clone(&followers);
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (left, top) = follow_position(event.client_x(), event.client_y());
            for (_, follower) in followers.iter() {
                let style = follower.style();
                let _ = style.set_property("left", &left);
                let _ = style.set_property("top", &top);
            }
        }
    };
    let document = page.document().clone();
    page.listen(&document, "mousemove", on_move);

    let hover_targets = page.query_all(HOVER_TARGET_SELECTOR)?;
    for target in &hover_targets {
        let entering = Rc::clone(&followers);
        page.listen(target, "mouseenter", move |_event: &Event| {
            set_hover(entering.as_slice(), true)
        });
        let leaving = Rc::clone(&followers);
        page.listen(target, "mouseleave", move |_event: &Event| {
            set_hover(leaving.as_slice(), false)
        });
    }

    page.attached("cursor", json!({ "hoverTargets": hover_targets.len() }));
    Ok(())
}
