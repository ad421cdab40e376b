use crate::models::FilterValues;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Grid and card layout for the listings page
pub const STYLESHEET: &str = include_str!("../../assets/listings.css");

/// Full listings page around already-rendered region content
pub fn page(filters: &FilterValues, stats: &str, listings: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Property Listings" }
                style { (PreEscaped(STYLESHEET)) }
            }
            body {
                (filter_form(filters))
                section id="stats" class="stats" { (PreEscaped(stats)) }
                section id="listings" class="listings" { (PreEscaped(listings)) }
            }
        }
    }
}

pub fn filter_form(filters: &FilterValues) -> Markup {
    html! {
        form id="filters" class="filters" {
            input type="search" id="q" name="q" placeholder="Search" value=(filters.q);
            input type="number" id="min_price" name="min_price" placeholder="Min price" value=(filters.min_price);
            input type="number" id="max_price" name="max_price" placeholder="Max price" value=(filters.max_price);
            select id="type" name="type" {
                @for (value, label) in [("", "Any type"), ("apartment", "Apartment"), ("house", "House"), ("penthouse", "Penthouse")] {
                    option value=(value) selected[filters.property_type == value] { (label) }
                }
            }
            input type="number" id="bedrooms" name="bedrooms" placeholder="Bedrooms" value=(filters.bedrooms);
            button type="submit" { "Search" }
            button type="reset" id="clearFilters" { "Clear" }
        }
    }
}
