// Controller exports
pub mod client;
pub mod fence;
pub mod perf;
pub mod reveal;

pub use client::{ClientError, ListingsClient, RefreshOutcome};
pub use fence::{RequestFence, Ticket};
pub use perf::{PerformanceMonitor, PerformanceSnapshot};
pub use reveal::{apply_stagger, IntersectionEntry, VisibilityObserver, ANIMATE_IN_CLASS, FADE_IN_CLASS};
