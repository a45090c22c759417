use std::cell::{Cell, RefCell};

#[cfg(target_arch = "wasm32")]
use serde_json::json;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use gloo::events::{EventListenerOptions, EventListenerPhase};
#[cfg(target_arch = "wasm32")]
use gloo::render::request_animation_frame;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, Event, HtmlElement, Window};

use crate::config::EffectsConfig;
#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const HEADER_SELECTOR: &str = "header";
pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
pub const FLOATING_SHAPE_SELECTOR: &str = ".floating-shape";
pub const SCROLLED_CLASS: &str = "scrolled";

const HERO_PARALLAX_SPEED: f64 = 0.5;
const HERO_FADE_DISTANCE_PX: f64 = 800.0;
const SHAPE_BASE_SPEED: f64 = 0.1;
const SHAPE_SPEED_STEP: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroParallax {
    pub content_offset: f64,
    pub opacity: f64,
}

/// Everything one scroll update writes to the page.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollFrame {
    pub scrolled: bool,
    pub hero: Option<HeroParallax>,
    pub shape_offsets: Vec<f64>,
}

impl ScrollFrame {
    pub fn compute(
        scroll_y: f64,
        viewport_width: f64,
        has_hero: bool,
        shape_count: usize,
        config: &EffectsConfig,
    ) -> Self {
        let hero = (has_hero && viewport_width > config.parallax_min_viewport_px).then(|| {
            HeroParallax {
                content_offset: scroll_y * HERO_PARALLAX_SPEED,
                opacity: hero_opacity(scroll_y),
            }
        });

        Self {
            scrolled: is_scrolled(scroll_y, config.scroll_threshold_px),
            hero,
            shape_offsets: (0..shape_count)
                .map(|index| scroll_y * shape_speed(index))
                .collect(),
        }
    }
}

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn hero_opacity(scroll_y: f64) -> f64 {
    (1.0 - scroll_y / HERO_FADE_DISTANCE_PX).max(0.0)
}

pub fn shape_speed(index: usize) -> f64 {
    SHAPE_BASE_SPEED + index as f64 * SHAPE_SPEED_STEP
}

pub fn translate_y(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Coalesces scroll bursts into one queued animation frame. `H` is the
/// handle of the queued request; dropping it cancels the request.
#[derive(Debug)]
pub struct FrameLatch<H> {
    queued: Cell<bool>,
    pending: RefCell<Option<H>>,
}

impl<H> Default for FrameLatch<H> {
    fn default() -> Self {
        Self {
            queued: Cell::new(false),
            pending: RefCell::new(None),
        }
    }
}

impl<H> FrameLatch<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `request` only when no frame is queued yet and keeps its handle.
    pub fn schedule(&self, request: impl FnOnce() -> H) -> bool {
        if self.queued.replace(true) {
            return false;
        }
        let handle = request();
        // the previous handle belongs to a frame that already ran
        drop(self.pending.replace(Some(handle)));
        true
    }

    /// Body of the queued frame: apply the update, then reopen the latch.
    pub fn run_frame(&self, update: impl FnOnce()) {
        update();
        self.queued.set(false);
    }

    /// Drops the pending handle, cancelling a frame that has not run yet.
    pub fn cancel(&self) {
        drop(self.pending.take());
        self.queued.set(false);
    }

    pub fn is_queued(&self) -> bool {
        self.queued.get()
    }
}

#[cfg(target_arch = "wasm32")]
struct ScrollTargets {
    window: Window,
    header: Option<Element>,
    body: HtmlElement,
    hero: Option<(HtmlElement, HtmlElement)>,
    shapes: Vec<HtmlElement>,
    config: EffectsConfig,
}

#[cfg(target_arch = "wasm32")]
impl ScrollTargets {
    fn apply(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let frame = ScrollFrame::compute(
            scroll_y,
            viewport_width(&self.window),
            self.hero.is_some(),
            self.shapes.len(),
            &self.config,
        );

        if let Some(header) = &self.header {
            let _ = header
                .class_list()
                .toggle_with_force(SCROLLED_CLASS, frame.scrolled);
        }
        let _ = self
            .body
            .class_list()
            .toggle_with_force(SCROLLED_CLASS, frame.scrolled);

        if let (Some((hero, content)), Some(parallax)) = (&self.hero, frame.hero) {
            let _ = content
                .style()
                .set_property("transform", &translate_y(parallax.content_offset));
            let _ = hero
                .style()
                .set_property("opacity", &parallax.opacity.to_string());
        }

        for (shape, offset) in self.shapes.iter().zip(&frame.shape_offsets) {
            let _ = shape.style().set_property("transform", &translate_y(*offset));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0)
}

#[cfg(target_arch = "wasm32")]
fn query_html(page: &PageEffects, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(page
        .query(selector)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok()))
}

#[cfg(target_arch = "wasm32")]
pub fn attach(page: &mut PageEffects) -> Result<(), JsValue> {
    let hero = match (
        query_html(page, HERO_SELECTOR)?,
        query_html(page, HERO_CONTENT_SELECTOR)?,
    ) {
        (Some(hero), Some(content)) => Some((hero, content)),
        _ => None,
    };
    let shapes: Vec<HtmlElement> = page
        .query_all(FLOATING_SHAPE_SELECTOR)?
        .into_iter()
        .filter_map(|shape| shape.dyn_into::<HtmlElement>().ok())
        .collect();

    let targets = Rc::new(ScrollTargets {
        window: page.window().clone(),
        header: page.query(HEADER_SELECTOR)?,
        body: page.body().clone(),
        hero,
        shapes,
        config: page.config().clone(),
    });
    let fields = json!({
        "header": targets.header.is_some(),
        "hero": targets.hero.is_some(),
        "shapes": targets.shapes.len(),
    });

    targets.apply();

    let latch = page.scroll_latch();
    let window = page.window().clone();
    page.listen_with_options(
        &window,
        "scroll",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: true,
        },
        move |_event: &Event| {
            latch.schedule(|| {
                let targets = Rc::clone(&targets);
                let latch = Rc::clone(&latch);
                request_animation_frame(move |_timestamp| latch.run_frame(|| targets.apply()))
            });
        },
    );

    page.attached("scroll", fields);
    Ok(())
}
