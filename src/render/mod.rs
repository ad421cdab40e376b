// Markup renderers. All of these are pure: they read models and return markup.
pub mod card;
pub mod format;
pub mod layout;
pub mod listings;
pub mod stats;

pub use card::{render_card, render_card_fragment, render_card_fragment_escaped, Escaping, PLACEHOLDER_IMAGE};
pub use format::{group_thousands, round_half_up};
pub use listings::{render_listings_error, render_listings_fragment, LOAD_FAILED_MESSAGE, NO_RESULTS_MESSAGE};
pub use stats::render_stats_fragment;
