#[cfg(target_arch = "wasm32")]
use serde_json::json;
#[cfg(target_arch = "wasm32")]
use gloo::timers::callback::Timeout;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const GLITCH_TARGET_SELECTOR: &str = ".name";
pub const GLITCH_TEXT_ATTRIBUTE: &str = "data-text";
pub const GLITCH_ACTIVE_CLASS: &str = "glitch-active";

/// `sample` is uniform in `[0, 1)`; a tick flashes when it lands in the top
/// `probability` slice. A probability of 1 flashes on every tick.
pub fn should_glitch(sample: f64, probability: f64) -> bool {
    probability >= 1.0 || sample > 1.0 - probability
}

#[cfg(target_arch = "wasm32")]
pub fn attach(page: &mut PageEffects) -> Result<(), JsValue> {
    let Some(title) = page.query(GLITCH_TARGET_SELECTOR)? else {
        page.skipped("glitch", "missing_title");
        return Ok(());
    };

    let text = title.text_content().unwrap_or_default();
    title.set_attribute(GLITCH_TEXT_ATTRIBUTE, &text)?;

    let probability = page.config().glitch_probability;
    let duration_ms = page.config().glitch_duration_ms;
    let interval_ms = page.config().glitch_interval_ms;

    page.every(interval_ms, move || {
        if !should_glitch(js_sys::Math::random(), probability) {
            return;
        }

        let _ = title.class_list().add_1(GLITCH_ACTIVE_CLASS);
        let flashed = title.clone();
        Timeout::new(duration_ms, move || {
            let _ = flashed.class_list().remove_1(GLITCH_ACTIVE_CLASS);
        })
        .forget();
    });

    page.attached("glitch", json!({ "intervalMs": interval_ms, "probability": probability }));
    Ok(())
}
