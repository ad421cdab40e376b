// Page model exports
pub mod capabilities;
pub mod document;
pub mod handles;

pub use capabilities::{Capabilities, PerformanceTiming};
pub use document::{ids, Document, Element, CARD_LIKE_CLASS, FEATURE_CLASS};
pub use handles::{FilterFields, UiHandles};
