use crate::ui::PerformanceTiming;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const UNKNOWN: &str = "unknown";

/// Diagnostic record emitted once during initialization
#[derive(Debug, Clone)]
pub struct PerformanceSnapshot {
    pub load_time: Duration,
    pub memory: String,
    pub connection: String,
    pub captured_at: DateTime<Utc>,
}

impl PerformanceSnapshot {
    pub fn capture(timing: &PerformanceTiming) -> Self {
        Self {
            load_time: timing.navigation_start.elapsed(),
            memory: timing
                .device_memory_gb
                .map(|gb| gb.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            connection: timing
                .effective_connection
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            captured_at: Utc::now(),
        }
    }
}

/// Fires at most once
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    fired: AtomicBool,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, timing: Option<&PerformanceTiming>) -> Option<PerformanceSnapshot> {
        let timing = timing?;
        if self.fired.swap(true, Ordering::SeqCst) {
            return None;
        }

        let snapshot = PerformanceSnapshot::capture(timing);
        tracing::info!(
            load_time_ms = snapshot.load_time.as_secs_f64() * 1000.0,
            memory = %snapshot.memory,
            connection = %snapshot.connection,
            "Performance metrics"
        );
        Some(snapshot)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_unknown_hints() {
        let snapshot = PerformanceSnapshot::capture(&PerformanceTiming::new(Instant::now()));
        assert_eq!(snapshot.memory, "unknown");
        assert_eq!(snapshot.connection, "unknown");
    }

    #[test]
    fn test_known_hints() {
        let timing = PerformanceTiming {
            navigation_start: Instant::now(),
            device_memory_gb: Some(8.0),
            effective_connection: Some("4g".to_string()),
        };
        let snapshot = PerformanceSnapshot::capture(&timing);
        assert_eq!(snapshot.memory, "8");
        assert_eq!(snapshot.connection, "4g");
    }

    #[test]
    fn test_fires_once() {
        let monitor = PerformanceMonitor::new();
        let timing = PerformanceTiming::new(Instant::now());
        assert!(monitor.start(Some(&timing)).is_some());
        assert!(monitor.start(Some(&timing)).is_none());
        assert!(monitor.has_fired());
    }

    #[test]
    fn test_no_timing_capability() {
        let monitor = PerformanceMonitor::new();
        assert!(monitor.start(None).is_none());
        assert!(!monitor.has_fired());
    }
}
