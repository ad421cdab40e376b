use crate::ui::Element;
use std::time::Duration;

pub const FADE_IN_CLASS: &str = "fade-in";
pub const ANIMATE_IN_CLASS: &str = "animate-in";

/// Cascade entrance: card `i` starts `i * step` after the first one.
/// Delays saturate at `Duration::MAX`.
pub fn apply_stagger(cards: &[Element], step: Duration) {
    for (index, card) in cards.iter().enumerate() {
        let delay = u32::try_from(index)
            .ok()
            .and_then(|i| step.checked_mul(i))
            .unwrap_or(Duration::MAX);
        card.set_animation_delay(delay);
        card.add_class(FADE_IN_CLASS);
    }
}

/// Visibility report for one observed element
#[derive(Debug, Clone)]
pub struct IntersectionEntry {
    pub target: Element,
    /// Visible fraction, 0.0 to 1.0
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: Element, ratio: f64) -> Self {
        Self { target, ratio }
    }
}

/// One-directional reveal: elements that become visible enough are
/// tagged `animate-in` and never untagged.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    targets: Vec<Element>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            targets: Vec::new(),
        }
    }

    pub fn observe(&mut self, element: Element) {
        if !self.is_observing(&element) {
            self.targets.push(element);
        }
    }

    pub fn is_observing(&self, element: &Element) -> bool {
        self.targets.iter().any(|t| t.same_node(element))
    }

    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    /// Tags every intersecting, observed target. Returns how many entries
    /// were intersecting.
    pub fn handle_entries(&self, entries: &[IntersectionEntry]) -> usize {
        let mut revealed = 0;
        for entry in entries {
            if entry.ratio > 0.0 && entry.ratio >= self.threshold && self.is_observing(&entry.target) {
                entry.target.add_class(ANIMATE_IN_CLASS);
                revealed += 1;
            }
        }
        revealed
    }
}
