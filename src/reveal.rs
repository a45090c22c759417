#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use crate::page::PageEffects;

pub const SECTION_SELECTOR: &str = "section";
pub const TEXT_SELECTOR: &str = "section p, section h2, section h3";
pub const VISIBLE_CLASS: &str = "visible";
pub const TEXT_REVEAL_CLASS: &str = "text-reveal";
pub const REVEALED_CLASS: &str = "revealed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Ignore,
    Reveal,
    RevealAndUnobserve,
}

/// How an intersection observer reacts to its entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPolicy {
    pub name: &'static str,
    pub threshold: f64,
    pub root_margin: &'static str,
    pub classes: &'static [&'static str],
    pub once: bool,
}

/// Sections keep being observed; re-adding `visible` is a no-op.
pub const SECTION_REVEAL: RevealPolicy = RevealPolicy {
    name: "section_reveal",
    threshold: 0.15,
    root_margin: "0px 0px -50px 0px",
    classes: &[VISIBLE_CLASS],
    once: false,
};

pub const TEXT_REVEAL: RevealPolicy = RevealPolicy {
    name: "text_reveal",
    threshold: 0.1,
    root_margin: "0px",
    classes: &[TEXT_REVEAL_CLASS, REVEALED_CLASS],
    once: true,
};

impl RevealPolicy {
    pub fn on_entry(&self, is_intersecting: bool) -> RevealAction {
        match (is_intersecting, self.once) {
            (false, _) => RevealAction::Ignore,
            (true, false) => RevealAction::Reveal,
            (true, true) => RevealAction::RevealAndUnobserve,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn attach_sections(page: &mut PageEffects) -> Result<(), JsValue> {
    let sections = page.query_all(SECTION_SELECTOR)?;
    page.observe(SECTION_REVEAL, &sections)
}

#[cfg(target_arch = "wasm32")]
pub fn attach_text(page: &mut PageEffects) -> Result<(), JsValue> {
    let text = page.query_all(TEXT_SELECTOR)?;
    page.observe(TEXT_REVEAL, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    /// Plays intersection entries against a policy the way the browser
    /// observer would deliver them.
    struct ObserverModel {
        policy: RevealPolicy,
        observed: HashSet<&'static str>,
        classes: BTreeSet<(&'static str, &'static str)>,
        reveals: usize,
    }

    impl ObserverModel {
        fn new(policy: RevealPolicy, targets: &[&'static str]) -> Self {
            Self {
                policy,
                observed: targets.iter().copied().collect(),
                classes: BTreeSet::new(),
                reveals: 0,
            }
        }

        fn deliver(&mut self, target: &'static str, is_intersecting: bool) {
            if !self.observed.contains(target) {
                return;
            }
            let action = self.policy.on_entry(is_intersecting);
            if action != RevealAction::Ignore {
                self.reveals += 1;
                for class in self.policy.classes {
                    self.classes.insert((target, *class));
                }
            }
            if action == RevealAction::RevealAndUnobserve {
                self.observed.remove(target);
            }
        }
    }

    #[test]
    fn text_reveal_fires_once_then_stops_observing() {
        let mut model = ObserverModel::new(TEXT_REVEAL, &["intro", "outro"]);

        model.deliver("intro", false);
        assert_eq!(model.reveals, 0);

        model.deliver("intro", true);
        assert!(model.classes.contains(&("intro", REVEALED_CLASS)));
        assert!(model.classes.contains(&("intro", TEXT_REVEAL_CLASS)));
        assert!(!model.observed.contains("intro"));

        model.deliver("intro", false);
        model.deliver("intro", true);
        assert_eq!(model.reveals, 1);
        assert!(model.observed.contains("outro"));
    }

    #[test]
    fn section_reveal_repeats_on_every_entry() {
        let mut model = ObserverModel::new(SECTION_REVEAL, &["about"]);

        model.deliver("about", true);
        model.deliver("about", false);
        model.deliver("about", true);

        assert_eq!(model.reveals, 2);
        assert_eq!(model.classes.len(), 1);
        assert!(model.classes.contains(&("about", VISIBLE_CLASS)));
        assert!(model.observed.contains("about"));
    }

    #[test]
    fn observer_options_match_each_reveal() {
        assert_eq!(SECTION_REVEAL.threshold, 0.15);
        assert_eq!(SECTION_REVEAL.root_margin, "0px 0px -50px 0px");
        assert_eq!(TEXT_REVEAL.threshold, 0.1);
        assert_eq!(TEXT_REVEAL.on_entry(false), RevealAction::Ignore);
        assert_eq!(SECTION_REVEAL.on_entry(false), RevealAction::Ignore);
    }
}
