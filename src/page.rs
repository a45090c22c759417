use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::AnimationFrame;
use gloo::timers::callback::Interval;
use js_sys::Array;
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::{
    anchors,
    config::EffectsConfig,
    cursor, glitch,
    reveal::{self, RevealAction, RevealPolicy},
    scroll::{self, FrameLatch},
    telemetry::{log_event, LogLevel},
    tilt,
};

type Initializer = fn(&mut PageEffects) -> Result<(), JsValue>;

const EFFECTS: [(&str, Initializer); 7] = [
    ("cursor", cursor::attach),
    ("glitch", glitch::attach),
    ("tilt", tilt::attach),
    ("text_reveal", reveal::attach_text),
    ("section_reveal", reveal::attach_sections),
    ("smooth_scroll", anchors::attach),
    ("scroll", scroll::attach),
];

struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Owns every listener, timer and observer the page effects install, plus the
/// element handles and scroll latch they share. Dropping it detaches them all.
pub struct PageEffects {
    window: Window,
    document: Document,
    body: HtmlElement,
    config: EffectsConfig,
    scroll_latch: Rc<FrameLatch<AnimationFrame>>,
    listeners: Vec<EventListener>,
    intervals: Vec<Interval>,
    observers: Vec<Observer>,
}

impl PageEffects {
    /// Reads the root `data-effects-*` overrides and attaches every effect.
    /// Returns `None` only outside a document with a body.
    pub fn start() -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        let body = document.body()?;
        let config = document
            .document_element()
            .map(|root| EffectsConfig::from_attributes(|name| root.get_attribute(name)))
            .unwrap_or_default();

        let mut page = Self {
            window,
            document,
            body,
            config,
            scroll_latch: Rc::new(FrameLatch::new()),
            listeners: Vec::new(),
            intervals: Vec::new(),
            observers: Vec::new(),
        };
        page.log(
            LogLevel::Debug,
            "effects_config_loaded",
            json!({ "config": page.config }),
        );

        for (effect, init) in EFFECTS {
            if let Err(error) = init(&mut page) {
                page.log(
                    LogLevel::Info,
                    "effect_init_failed",
                    json!({ "effect": effect, "error": describe_js_error(&error) }),
                );
            }
        }

        page.log(
            LogLevel::Debug,
            "effects_started",
            json!({
                "listeners": page.listeners.len(),
                "intervals": page.intervals.len(),
                "observers": page.observers.len(),
            }),
        );
        Some(page)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn body(&self) -> &HtmlElement {
        &self.body
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn scroll_latch(&self) -> Rc<FrameLatch<AnimationFrame>> {
        Rc::clone(&self.scroll_latch)
    }

    pub fn query(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.document.query_selector(selector)
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        let nodes = self.document.query_selector_all(selector)?;

        Ok((0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    /// Passive listener; the callback cannot cancel the event.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(&Event) + 'static,
    ) {
        self.listeners
            .push(EventListener::new(target, event, callback));
    }

    pub fn listen_with_options(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        options: EventListenerOptions,
        callback: impl FnMut(&Event) + 'static,
    ) {
        self.listeners
            .push(EventListener::new_with_options(target, event, options, callback));
    }

    pub fn every(&mut self, millis: u32, tick: impl FnMut() + 'static) {
        self.intervals.push(Interval::new(millis, tick));
    }

    pub fn observe(&mut self, policy: RevealPolicy, targets: &[Element]) -> Result<(), JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();

                    match policy.on_entry(entry.is_intersecting()) {
                        RevealAction::Ignore => {}
                        RevealAction::Reveal => add_classes(&target, policy.classes),
                        RevealAction::RevealAndUnobserve => {
                            add_classes(&target, policy.classes);
                            observer.unobserve(&target);
                        }
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(policy.threshold));
        options.set_root_margin(policy.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for target in targets {
            observer.observe(target);
        }

        self.observers.push(Observer {
            observer,
            _callback: callback,
        });
        self.attached(policy.name, json!({ "targets": targets.len() }));
        Ok(())
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        log_event(self.config.log_level, level, event, fields);
    }

    pub fn attached(&self, effect: &str, fields: serde_json::Value) {
        let mut payload = json!({ "effect": effect });
        if let (Some(payload), serde_json::Value::Object(extra)) = (payload.as_object_mut(), fields)
        {
            payload.extend(extra);
        }
        self.log(LogLevel::Debug, "effect_attached", payload);
    }

    pub fn skipped(&self, effect: &str, reason: &str) {
        self.log(
            LogLevel::Info,
            "effect_skipped",
            json!({ "effect": effect, "reason": reason }),
        );
    }
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        // The queued frame callback holds the latch; cancelling breaks that cycle.
        self.scroll_latch.cancel();
    }
}

fn add_classes(target: &Element, classes: &[&str]) {
    let class_list = target.class_list();
    for class in classes {
        let _ = class_list.add_1(class);
    }
}

fn describe_js_error(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }

    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}
