use crate::models::StatsSummary;
use crate::render::format::{group_thousands, round_half_up};
use maud::{html, Markup};

/// Stats region content: total, available and the rounded average price
pub fn render_stats_fragment(stats: &StatsSummary) -> Markup {
    html! {
        div class="stat-card" {
            strong { "Total:" } " " (stats.total_properties)
        }
        div class="stat-card" {
            strong { "Available:" } " " (stats.available_properties)
        }
        div class="stat-card" {
            strong { "Avg Price:" } " $" (group_thousands(round_half_up(stats.average_price)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_three_blocks() {
        let stats = StatsSummary {
            total_properties: 3,
            available_properties: 2,
            average_price: 766666.666,
            type_distribution: BTreeMap::new(),
            price_ranges: BTreeMap::new(),
        };

        let html = render_stats_fragment(&stats).into_string();
        assert_eq!(html.matches("class=\"stat-card\"").count(), 3);
        assert!(html.contains("<strong>Total:</strong> 3"));
        assert!(html.contains("<strong>Available:</strong> 2"));
        assert!(html.contains("$766,667"));
    }
}
