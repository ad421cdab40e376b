use crate::models::FilterValues;
use crate::ui::document::{ids, Document, Element, CARD_LIKE_CLASS, FEATURE_CLASS};

/// The five filter inputs; each may be absent from the page
#[derive(Debug, Clone, Default)]
pub struct FilterFields {
    pub q: Option<Element>,
    pub min_price: Option<Element>,
    pub max_price: Option<Element>,
    pub property_type: Option<Element>,
    pub bedrooms: Option<Element>,
}

impl FilterFields {
    fn all(&self) -> [&Option<Element>; 5] {
        [
            &self.q,
            &self.min_price,
            &self.max_price,
            &self.property_type,
            &self.bedrooms,
        ]
    }

    /// Current field contents; a missing field reads as empty
    pub fn values(&self) -> FilterValues {
        let read = |field: &Option<Element>| field.as_ref().map(Element::value).unwrap_or_default();
        FilterValues {
            q: read(&self.q),
            min_price: read(&self.min_price),
            max_price: read(&self.max_price),
            property_type: read(&self.property_type),
            bedrooms: read(&self.bedrooms),
        }
    }

    pub fn reset(&self) {
        for field in self.all().into_iter().flatten() {
            field.reset();
        }
    }
}

/// Everything the client touches on the page, resolved once
#[derive(Debug, Clone, Default)]
pub struct UiHandles {
    pub form: Option<Element>,
    pub fields: FilterFields,
    pub listings: Option<Element>,
    pub stats: Option<Element>,
    pub clear_filters: Option<Element>,
    pub reveal_cards: Vec<Element>,
    pub reveal_features: Vec<Element>,
}

impl UiHandles {
    /// Look every handle up by id or class. Missing ones stay `None`.
    pub fn acquire(doc: &Document) -> Self {
        let handles = Self {
            form: doc.get_element_by_id(ids::FILTERS),
            fields: FilterFields {
                q: doc.get_element_by_id(ids::Q),
                min_price: doc.get_element_by_id(ids::MIN_PRICE),
                max_price: doc.get_element_by_id(ids::MAX_PRICE),
                property_type: doc.get_element_by_id(ids::TYPE),
                bedrooms: doc.get_element_by_id(ids::BEDROOMS),
            },
            listings: doc.get_element_by_id(ids::LISTINGS),
            stats: doc.get_element_by_id(ids::STATS),
            clear_filters: doc.get_element_by_id(ids::CLEAR_FILTERS),
            reveal_cards: doc.query_class(CARD_LIKE_CLASS),
            reveal_features: doc.query_class(FEATURE_CLASS),
        };

        tracing::debug!(
            form = handles.form.is_some(),
            listings = handles.listings.is_some(),
            stats = handles.stats.is_some(),
            clear_filters = handles.clear_filters.is_some(),
            reveal_cards = handles.reveal_cards.len(),
            reveal_features = handles.reveal_features.len(),
            "UI handles acquired"
        );

        handles
    }
}
