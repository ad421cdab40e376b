use std::time::Instant;

/// Optional host features the client checks before using them
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    pub intersection_observer: bool,
    pub performance: Option<PerformanceTiming>,
}

impl Capabilities {
    /// Timing is available, visibility observation is not
    pub fn native(navigation_start: Instant) -> Self {
        Self {
            intersection_observer: false,
            performance: Some(PerformanceTiming::new(navigation_start)),
        }
    }
}

/// Navigation timing plus the device hints a host may expose
#[derive(Debug, Clone)]
pub struct PerformanceTiming {
    pub navigation_start: Instant,
    pub device_memory_gb: Option<f64>,
    pub effective_connection: Option<String>,
}

impl PerformanceTiming {
    pub fn new(navigation_start: Instant) -> Self {
        Self {
            navigation_start,
            device_memory_gb: None,
            effective_connection: None,
        }
    }
}
