//! Listings Client - property listings page controller
//!
//! Fetches statistics and filtered listings from the marketplace API and
//! renders them into page regions, with filter handling, reveal effects and
//! a one-shot performance record.

pub mod config;
pub mod core;
pub mod events;
pub mod models;
pub mod render;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{ListingsClient, RefreshOutcome, RequestFence};
pub use models::{FilterQuery, FilterValues, PropertySummary, StatsSummary};
pub use render::{render_card_fragment, render_stats_fragment};
pub use services::{ApiClient, ApiError};
pub use ui::{Capabilities, Document, Element, UiHandles};
