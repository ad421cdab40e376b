use std::sync::atomic::{AtomicU64, Ordering};

/// Token handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Last-request-wins guard for one region.
///
/// Every refresh takes a ticket before it goes out; when the response
/// comes back it may only render if no newer ticket was issued meanwhile.
#[derive(Debug, Default)]
pub struct RequestFence {
    latest: AtomicU64,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[inline]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
