use crate::config::{RevealSettings, Settings};
use crate::core::fence::RequestFence;
use crate::core::perf::{PerformanceMonitor, PerformanceSnapshot};
use crate::core::reveal::{apply_stagger, IntersectionEntry, VisibilityObserver};
use crate::models::{FilterQuery, PropertySummary, StatsSummary};
use crate::render::{render_listings_error, render_listings_fragment, render_stats_fragment, Escaping};
use crate::services::{ApiClient, ApiError};
use crate::ui::{Capabilities, Document, Element, UiHandles};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors contained inside a refresh
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Region not found on page: {0}")]
    MissingRegion(&'static str),
}

/// What a refresh did to its region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh content rendered
    Rendered,
    /// Listings came back empty; the no-results message is shown
    Empty,
    /// Request failed; listings show the failure message, stats are untouched
    Failed,
    /// A newer refresh was issued while this one was in flight
    Stale,
    /// The region is not on the page
    Skipped,
}

/// Handlers that `bind_ui` switched on
#[derive(Debug)]
struct Bindings {
    submit: bool,
    clear: bool,
    observer: Option<VisibilityObserver>,
}

/// Listings page controller
///
/// Owns the page handles, fetches stats and listings, renders them into
/// their regions and reacts to UI events. Every operation on a handle that
/// is missing from the page is a no-op.
pub struct ListingsClient {
    api: ApiClient,
    handles: UiHandles,
    capabilities: Capabilities,
    reveal: RevealSettings,
    escaping: Escaping,
    stats_fence: RequestFence,
    listings_fence: RequestFence,
    bindings: Mutex<Option<Bindings>>,
    performance: PerformanceMonitor,
    ready: AtomicBool,
}

impl ListingsClient {
    pub fn new(
        api: ApiClient,
        handles: UiHandles,
        capabilities: Capabilities,
        settings: &Settings,
    ) -> Self {
        Self {
            api,
            handles,
            capabilities,
            reveal: settings.reveal.clone(),
            escaping: Escaping::from_flag(settings.render.escape_html),
            stats_fence: RequestFence::new(),
            listings_fence: RequestFence::new(),
            bindings: Mutex::new(None),
            performance: PerformanceMonitor::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Resolve handles from the page, then build the client
    pub fn from_document(
        api: ApiClient,
        doc: &Document,
        capabilities: Capabilities,
        settings: &Settings,
    ) -> Self {
        Self::new(api, UiHandles::acquire(doc), capabilities, settings)
    }

    pub fn handles(&self) -> &UiHandles {
        &self.handles
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Startup sequence. Each step contains its own failures, so a dead
    /// stats endpoint still lets listings load.
    pub async fn init(&self) {
        self.bind_ui();
        self.refresh_stats().await;
        self.refresh_listings().await;
        self.start_performance_monitoring();
        self.ready.store(true, Ordering::SeqCst);
        tracing::info!("Listings client initialized");
    }

    /// Switch on the event handlers whose targets exist
    pub fn bind_ui(&self) {
        let observer = if self.capabilities.intersection_observer {
            let mut observer = VisibilityObserver::new(self.reveal.threshold);
            for element in self
                .handles
                .reveal_features
                .iter()
                .chain(self.handles.reveal_cards.iter())
            {
                observer.observe(element.clone());
            }
            Some(observer)
        } else {
            None
        };

        let bindings = Bindings {
            submit: self.handles.form.is_some(),
            clear: self.handles.clear_filters.is_some(),
            observer,
        };
        tracing::debug!(
            submit = bindings.submit,
            clear = bindings.clear,
            observer = bindings.observer.is_some(),
            "UI bound"
        );

        *self.bindings.lock().unwrap_or_else(PoisonError::into_inner) = Some(bindings);
    }

    fn with_bindings<R>(&self, f: impl FnOnce(&Bindings) -> R) -> Option<R> {
        let guard = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        let result = guard.as_ref().map(f);
        result
    }

    /// Current form contents as listings query parameters
    pub fn filter_query(&self) -> FilterQuery {
        FilterQuery::from_values(&self.handles.fields.values())
    }

    /// Current form contents as a query string, empty when nothing is set
    pub fn build_filter_query(&self) -> String {
        self.filter_query().to_query_string()
    }

    /// Fetch stats and render them. Failures are logged; the region keeps
    /// whatever it showed before.
    pub async fn refresh_stats(&self) -> RefreshOutcome {
        let region = match self.region(&self.handles.stats, "stats") {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!("Skipping stats refresh: {}", e);
                return RefreshOutcome::Skipped;
            }
        };

        let ticket = self.stats_fence.issue();
        let result = self.fetch_stats().await;

        if !self.stats_fence.is_current(ticket) {
            tracing::debug!("Discarding stale stats response #{}", ticket.value());
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(stats) => {
                region.set_inner_html(render_stats_fragment(&stats).into_string());
                RefreshOutcome::Rendered
            }
            Err(e) => {
                tracing::error!("Failed to load stats: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Fetch listings for the current filters and render them. On failure
    /// the region is overwritten with the failure message.
    pub async fn refresh_listings(&self) -> RefreshOutcome {
        let region = match self.region(&self.handles.listings, "listings") {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!("Skipping listings refresh: {}", e);
                return RefreshOutcome::Skipped;
            }
        };

        let query = self.filter_query();
        let ticket = self.listings_fence.issue();
        let result = self.fetch_listings(&query).await;

        if !self.listings_fence.is_current(ticket) {
            tracing::debug!("Discarding stale listings response #{}", ticket.value());
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(items) => {
                region.set_inner_html(render_listings_fragment(&items, self.escaping).into_string());
                tracing::info!("Rendered {} properties", items.len());
                if items.is_empty() {
                    RefreshOutcome::Empty
                } else {
                    RefreshOutcome::Rendered
                }
            }
            Err(e) => {
                tracing::error!("Failed to load properties: {}", e);
                region.set_inner_html(render_listings_error().into_string());
                RefreshOutcome::Failed
            }
        }
    }

    async fn fetch_stats(&self) -> Result<StatsSummary, ClientError> {
        Ok(self.api.get_stats().await?)
    }

    async fn fetch_listings(&self, query: &FilterQuery) -> Result<Vec<PropertySummary>, ClientError> {
        Ok(self.api.get_properties(query).await?)
    }

    fn region<'a>(
        &self,
        handle: &'a Option<Element>,
        name: &'static str,
    ) -> Result<&'a Element, ClientError> {
        handle.as_ref().ok_or(ClientError::MissingRegion(name))
    }

    /// Filter form submitted. `None` when the form was never bound.
    pub async fn on_submit(&self) -> Option<RefreshOutcome> {
        if self.with_bindings(|b| b.submit) != Some(true) {
            return None;
        }
        Some(self.refresh_listings().await)
    }

    /// Clear-filters clicked: reset the fields, then refetch
    pub async fn on_clear_filters(&self) -> Option<RefreshOutcome> {
        if self.with_bindings(|b| b.clear) != Some(true) {
            return None;
        }
        self.handles.fields.reset();
        Some(self.refresh_listings().await)
    }

    /// Page structure is ready: stagger the entrance of card-like elements
    pub fn on_document_ready(&self) {
        if self.with_bindings(|_| ()).is_none() {
            return;
        }
        apply_stagger(&self.handles.reveal_cards, self.reveal.stagger());
    }

    /// Visibility changed for some observed elements. Returns how many were revealed.
    pub fn on_intersection(&self, entries: &[IntersectionEntry]) -> usize {
        self.with_bindings(|b| {
            b.observer
                .as_ref()
                .map(|observer| observer.handle_entries(entries))
        })
        .flatten()
        .unwrap_or(0)
    }

    /// One-shot diagnostic record, only when timing is available
    pub fn start_performance_monitoring(&self) -> Option<PerformanceSnapshot> {
        self.performance.start(self.capabilities.performance.as_ref())
    }
}
