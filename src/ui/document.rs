use crate::models::FilterValues;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Handle to a node in the page.
///
/// Clones share the same node, so a region handed to the client and the
/// copy kept by the host page always agree on content and classes.
#[derive(Debug, Clone, Default)]
pub struct Element {
    inner: Arc<Mutex<ElementState>>,
}

#[derive(Debug, Default)]
struct ElementState {
    id: Option<String>,
    classes: Vec<String>,
    inner_html: String,
    value: String,
    default_value: String,
    animation_delay: Option<Duration>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let element = Self::new();
        element.state().id = Some(id.into());
        element
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets both the current and the reset value of a form field
    pub fn with_value(self, value: impl Into<String>) -> Self {
        let value = value.into();
        {
            let mut state = self.state();
            state.default_value = value.clone();
            state.value = value;
        }
        self
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> Option<String> {
        self.state().id.clone()
    }

    pub fn inner_html(&self) -> String {
        self.state().inner_html.clone()
    }

    /// Replaces the whole content
    pub fn set_inner_html(&self, html: impl Into<String>) {
        self.state().inner_html = html.into();
    }

    /// Content with tags stripped and surrounding whitespace trimmed
    pub fn text_content(&self) -> String {
        let html = self.inner_html();
        let mut text = String::with_capacity(html.len());
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => text.push(c),
                _ => {}
            }
        }
        text.trim().to_string()
    }

    pub fn value(&self) -> String {
        self.state().value.clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.state().value = value.into();
    }

    /// Form reset: back to the value the field was created with
    pub fn reset(&self) {
        let mut state = self.state();
        state.value = state.default_value.clone();
    }

    pub fn add_class(&self, class: &str) {
        let mut state = self.state();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.state().classes.clone()
    }

    pub fn animation_delay(&self) -> Option<Duration> {
        self.state().animation_delay
    }

    pub fn set_animation_delay(&self, delay: Duration) {
        self.state().animation_delay = Some(delay);
    }

    pub fn same_node(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Element ids the listings page is built from
pub mod ids {
    pub const FILTERS: &str = "filters";
    pub const LISTINGS: &str = "listings";
    pub const STATS: &str = "stats";
    pub const CLEAR_FILTERS: &str = "clearFilters";
    pub const Q: &str = "q";
    pub const MIN_PRICE: &str = "min_price";
    pub const MAX_PRICE: &str = "max_price";
    pub const TYPE: &str = "type";
    pub const BEDROOMS: &str = "bedrooms";
}

/// Classes of the pre-existing elements that get reveal effects
pub const CARD_LIKE_CLASS: &str = "tech-card";
pub const FEATURE_CLASS: &str = "feature";

/// Flat in-memory page: lookup by id and by class
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard listings page with filter fields seeded from `filters`
    pub fn listings_page(filters: &FilterValues) -> Self {
        let mut doc = Self::new();
        for id in [ids::FILTERS, ids::LISTINGS, ids::STATS, ids::CLEAR_FILTERS] {
            doc.insert(Element::with_id(id));
        }
        doc.insert(Element::with_id(ids::Q).with_value(filters.q.as_str()));
        doc.insert(Element::with_id(ids::MIN_PRICE).with_value(filters.min_price.as_str()));
        doc.insert(Element::with_id(ids::MAX_PRICE).with_value(filters.max_price.as_str()));
        doc.insert(Element::with_id(ids::TYPE).with_value(filters.property_type.as_str()));
        doc.insert(Element::with_id(ids::BEDROOMS).with_value(filters.bedrooms.as_str()));
        doc
    }

    pub fn insert(&mut self, element: Element) -> Element {
        self.elements.push(element.clone());
        element
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.elements
            .iter()
            .find(|e| e.id().as_deref() == Some(id))
            .cloned()
    }

    /// Elements carrying `class`, in insertion order
    pub fn query_class(&self, class: &str) -> Vec<Element> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let region = Element::with_id("listings");
        let copy = region.clone();
        copy.set_inner_html("<p>No results found.</p>");
        assert_eq!(region.text_content(), "No results found.");
        assert!(region.same_node(&copy));
        assert!(!region.same_node(&Element::with_id("listings")));
    }

    #[test]
    fn test_reset_restores_initial_value() {
        let field = Element::with_id("q").with_value("");
        field.set_value("loft");
        field.reset();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_lookup() {
        let mut doc = Document::listings_page(&FilterValues::default());
        doc.insert(Element::new().with_class(CARD_LIKE_CLASS));
        doc.insert(Element::new().with_class(FEATURE_CLASS));
        doc.insert(Element::new().with_class(CARD_LIKE_CLASS));

        assert!(doc.get_element_by_id(ids::LISTINGS).is_some());
        assert!(doc.get_element_by_id("missing").is_none());
        assert_eq!(doc.query_class(CARD_LIKE_CLASS).len(), 2);
        assert_eq!(doc.query_class(FEATURE_CLASS).len(), 1);
    }
}
