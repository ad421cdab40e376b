// Model exports
pub mod domain;
pub mod requests;

pub use domain::{PropertySummary, StatsSummary};
pub use requests::{FilterQuery, FilterValues};
