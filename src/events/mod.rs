//! UI events and the loop that feeds them to the client.
//!
//! Each event runs as its own task, so a second submit can start while the
//! first refresh is still waiting on the network. Request fencing in the
//! client decides which response gets rendered.

use crate::core::{IntersectionEntry, ListingsClient};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[derive(Debug, Clone)]
pub enum UiEvent {
    SubmitFilters,
    ClearFilters,
    DocumentReady,
    Intersection(Vec<IntersectionEntry>),
}

/// Route one event to its handler
pub async fn dispatch(client: &ListingsClient, event: UiEvent) {
    match event {
        UiEvent::SubmitFilters => {
            if let Some(outcome) = client.on_submit().await {
                tracing::debug!("Submit handled: {:?}", outcome);
            }
        }
        UiEvent::ClearFilters => {
            if let Some(outcome) = client.on_clear_filters().await {
                tracing::debug!("Clear filters handled: {:?}", outcome);
            }
        }
        UiEvent::DocumentReady => client.on_document_ready(),
        UiEvent::Intersection(entries) => {
            let revealed = client.on_intersection(&entries);
            tracing::trace!("Revealed {} elements", revealed);
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventSender {
    /// Returns false once the loop has stopped
    pub fn send(&self, event: UiEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct EventLoop {
    rx: mpsc::UnboundedReceiver<UiEvent>,
}

pub fn channel() -> (EventSender, EventLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventLoop { rx })
}

impl EventLoop {
    /// Run until every sender is dropped, then wait for in-flight handlers
    pub async fn run(mut self, client: Arc<ListingsClient>) {
        let mut tasks = JoinSet::new();

        while let Some(event) = self.rx.recv().await {
            let client = Arc::clone(&client);
            tasks.spawn(async move {
                dispatch(&client, event).await;
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Event handler panicked: {}", e);
            }
        }
    }
}
