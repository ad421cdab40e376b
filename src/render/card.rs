use crate::models::PropertySummary;
use crate::render::format::group_thousands;
use maud::{html, Markup, PreEscaped};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/600x300?text=Property";
pub const DESCRIPTION_LIMIT: usize = 120;
pub const FEATURE_LIMIT: usize = 4;
pub const FEATURE_SEPARATOR: &str = " • ";

/// How server-sourced strings are interpolated into a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Inserted verbatim; the API is a trusted source
    #[default]
    Trusted,
    /// HTML-escaped
    Escaped,
}

impl Escaping {
    pub fn from_flag(escape_html: bool) -> Self {
        if escape_html {
            Self::Escaped
        } else {
            Self::Trusted
        }
    }

    fn text(self, value: &str) -> Markup {
        match self {
            Self::Trusted => PreEscaped(value.to_string()),
            Self::Escaped => html! { (value) },
        }
    }
}

/// Listing card with server text inserted verbatim
pub fn render_card_fragment(property: &PropertySummary) -> Markup {
    render_card(property, Escaping::Trusted)
}

/// Listing card with every server-sourced string escaped
pub fn render_card_fragment_escaped(property: &PropertySummary) -> Markup {
    render_card(property, Escaping::Escaped)
}

pub fn render_card(property: &PropertySummary, escaping: Escaping) -> Markup {
    let image = property.primary_image().unwrap_or(PLACEHOLDER_IMAGE);
    let description = truncate_description(property.description.as_deref().unwrap_or(""));

    html! {
        article class="card" {
            img src=(escaping.text(image)) alt=(escaping.text(&property.title));
            div class="card-body" {
                h3 { (escaping.text(&property.title)) }
                p class="muted" { (escaping.text(&address_line(property))) }
                p { (escaping.text(&description)) }
                div class="meta" {
                    span { "$" (group_thousands(property.price)) }
                    span {
                        (property.bedrooms) " bd • "
                        (property.bathrooms) " ba • "
                        (property.area) " sqft"
                    }
                }
                div class="meta" {
                    span class="badge" { (escaping.text(&property.property_type)) }
                    span class="muted" { (escaping.text(&feature_line(&property.features))) }
                }
            }
        }
    }
}

/// `address city state`, each part empty when missing
pub fn address_line(property: &PropertySummary) -> String {
    format!(
        "{} {} {}",
        property.address.as_deref().unwrap_or(""),
        property.city.as_deref().unwrap_or(""),
        property.state.as_deref().unwrap_or("")
    )
}

/// First `DESCRIPTION_LIMIT` characters followed by `...`.
/// Cuts on a character count, not a word boundary.
pub fn truncate_description(description: &str) -> String {
    let mut out: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    out.push_str("...");
    out
}

pub fn feature_line(features: &[String]) -> String {
    features
        .iter()
        .take(FEATURE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(FEATURE_SEPARATOR)
}
