#[cfg(target_arch = "wasm32")]
use serde_json::json;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, HtmlElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const CARD_SELECTOR: &str = ".card";

const PERSPECTIVE_PX: f64 = 1000.0;
const TILT_DIVISOR: f64 = 10.0;
const LIFT_PX: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rotation in degrees plus the upward lift applied while hovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub lift: f64,
}

impl Tilt {
    pub const NEUTRAL: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
        lift: 0.0,
    };

    /// Leans the card toward the pointer: below center raises `rotate_x`,
    /// right of center lowers `rotate_y`.
    pub fn toward_pointer(bounds: CardBounds, client_x: f64, client_y: f64) -> Self {
        let x = client_x - bounds.left;
        let y = client_y - bounds.top;
        let center_x = bounds.width / 2.0;
        let center_y = bounds.height / 2.0;

        Self {
            rotate_x: (y - center_y) / TILT_DIVISOR,
            rotate_y: (center_x - x) / TILT_DIVISOR,
            lift: LIFT_PX,
        }
    }

    pub fn transform(&self) -> String {
        if *self == Self::NEUTRAL {
            return format!("perspective({PERSPECTIVE_PX}px) rotateX(0) rotateY(0) translateY(0)");
        }

        format!(
            "perspective({PERSPECTIVE_PX}px) rotateX({}deg) rotateY({}deg) translateY(-{}px)",
            self.rotate_x, self.rotate_y, self.lift
        )
    }
}

#[cfg(target_arch = "wasm32")]
pub fn attach(page: &mut PageEffects) -> Result<(), JsValue> {
    let cards: Vec<HtmlElement> = page
        .query_all(CARD_SELECTOR)?
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok())
        .collect();

    for card in &cards {
        let on_move = {
            let card = card.clone();
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = card.get_bounding_client_rect();
                let bounds = CardBounds {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                };
                let tilt = Tilt::toward_pointer(
                    bounds,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
                let _ = card.style().set_property("transform", &tilt.transform());
            }
        };

        let on_leave = {
            let card = card.clone();
            move |_event: &Event| {
                let _ = card
                    .style()
                    .set_property("transform", &Tilt::NEUTRAL.transform());
            }
        };

        page.listen(card, "mousemove", on_move);
        page.listen(card, "mouseleave", on_leave);
    }

    page.attached("tilt", json!({ "cards": cards.len() }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: CardBounds = CardBounds {
        left: 40.0,
        top: 120.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn rotation_signs_follow_pointer_offset_from_center() {
        let center_x = CARD.left + CARD.width / 2.0;
        let center_y = CARD.top + CARD.height / 2.0;
        let pointers = [
            (CARD.left + 5.0, CARD.top + 5.0),
            (CARD.left + CARD.width - 5.0, CARD.top + 5.0),
            (CARD.left + 5.0, CARD.top + CARD.height - 5.0),
            (CARD.left + CARD.width - 1.0, CARD.top + CARD.height - 1.0),
            (center_x + 30.0, center_y),
            (center_x, center_y - 20.0),
        ];

        for (pointer_x, pointer_y) in pointers {
            let tilt = Tilt::toward_pointer(CARD, pointer_x, pointer_y);
            assert_eq!(
                tilt.rotate_x.partial_cmp(&0.0),
                (pointer_y - center_y).partial_cmp(&0.0),
                "rotate_x sign at ({pointer_x}, {pointer_y})"
            );
            assert_eq!(
                tilt.rotate_y.partial_cmp(&0.0),
                (center_x - pointer_x).partial_cmp(&0.0),
                "rotate_y sign at ({pointer_x}, {pointer_y})"
            );
        }
    }

    #[test]
    fn top_left_corner_tilts_by_a_tenth_of_the_half_size() {
        let tilt = Tilt::toward_pointer(CARD, CARD.left, CARD.top);
        assert_eq!(tilt.rotate_x, -5.0);
        assert_eq!(tilt.rotate_y, 10.0);
        assert_eq!(
            tilt.transform(),
            "perspective(1000px) rotateX(-5deg) rotateY(10deg) translateY(-4px)"
        );
    }

    #[test]
    fn centered_pointer_still_lifts_the_card() {
        let tilt = Tilt::toward_pointer(CARD, 140.0, 170.0);
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.lift, LIFT_PX);
        assert_ne!(tilt, Tilt::NEUTRAL);
    }

    #[test]
    fn leaving_resets_to_neutral_transform() {
        assert_eq!(
            Tilt::NEUTRAL.transform(),
            "perspective(1000px) rotateX(0) rotateY(0) translateY(0)"
        );
    }
}
