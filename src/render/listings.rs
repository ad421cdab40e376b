use crate::models::PropertySummary;
use crate::render::card::{render_card, Escaping};
use maud::{html, Markup};

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load properties.";

/// Listings region content: one card per item in received order,
/// or the empty-result message
pub fn render_listings_fragment(items: &[PropertySummary], escaping: Escaping) -> Markup {
    if items.is_empty() {
        return html! { p { (NO_RESULTS_MESSAGE) } };
    }

    html! {
        @for item in items {
            (render_card(item, escaping))
        }
    }
}

pub fn render_listings_error() -> Markup {
    html! { p { (LOAD_FAILED_MESSAGE) } }
}
