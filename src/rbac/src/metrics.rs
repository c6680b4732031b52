//! Evaluation counters for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the authorizer counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalMetrics {
    /// Total number of evaluations
    pub evaluations: u64,

    /// Evaluations that matched a binding
    pub allowed: u64,

    /// Evaluations that matched nothing
    pub denied: u64,

    /// Writes refused by validation
    pub rejected_writes: u64,
}

impl EvalMetrics {
    /// Fraction of evaluations that were allowed
    pub fn allow_rate(&self) -> f64 {
        if self.evaluations == 0 {
            0.0
        } else {
            self.allowed as f64 / self.evaluations as f64
        }
    }
}

/// Lock-free counter set, safe to update from concurrent evaluations
#[derive(Debug, Default)]
pub struct MetricsCollector {
    evaluations: AtomicU64,
    allowed: AtomicU64,
    denied: AtomicU64,
    rejected_writes: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation outcome
    pub fn record_decision(&self, allowed: bool) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        if allowed {
            self.allowed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.denied.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a write refused by validation
    pub fn record_rejected_write(&self) {
        self.rejected_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> EvalMetrics {
        EvalMetrics {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            allowed: self.allowed.load(Ordering::Relaxed),
            denied: self.denied.load(Ordering::Relaxed),
            rejected_writes: self.rejected_writes.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
        self.allowed.store(0, Ordering::Relaxed);
        self.denied.store(0, Ordering::Relaxed);
        self.rejected_writes.store(0, Ordering::Relaxed);
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let metrics = self.snapshot();

        format!(
            r#"# HELP rbac_evaluations_total Total number of RBAC evaluations
# TYPE rbac_evaluations_total counter
rbac_evaluations_total {}

# HELP rbac_allowed_total Evaluations that matched a role binding
# TYPE rbac_allowed_total counter
rbac_allowed_total {}

# HELP rbac_denied_total Evaluations that matched nothing
# TYPE rbac_denied_total counter
rbac_denied_total {}

# HELP rbac_rejected_writes_total Roles and bindings refused by validation
# TYPE rbac_rejected_writes_total counter
rbac_rejected_writes_total {}
"#,
            metrics.evaluations, metrics.allowed, metrics.denied, metrics.rejected_writes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decision() {
        let collector = MetricsCollector::new();

        collector.record_decision(true);
        collector.record_decision(false);
        collector.record_decision(true);

        let metrics = collector.snapshot();
        assert_eq!(metrics.evaluations, 3);
        assert_eq!(metrics.allowed, 2);
        assert_eq!(metrics.denied, 1);
        assert!((metrics.allow_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_allow_rate() {
        assert_eq!(EvalMetrics::default().allow_rate(), 0.0);
    }

    #[test]
    fn test_prometheus_export() {
        let collector = MetricsCollector::new();

        collector.record_decision(true);
        collector.record_rejected_write();

        let prometheus = collector.export_prometheus();
        assert!(prometheus.contains("rbac_evaluations_total 1"));
        assert!(prometheus.contains("rbac_allowed_total 1"));
        assert!(prometheus.contains("rbac_rejected_writes_total 1"));
    }

    #[test]
    fn test_reset() {
        let collector = MetricsCollector::new();

        collector.record_decision(true);
        collector.record_rejected_write();
        collector.reset();

        assert_eq!(collector.snapshot(), EvalMetrics::default());
    }
}
