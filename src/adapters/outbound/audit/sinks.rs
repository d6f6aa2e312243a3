use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    domain::models::{AuditOutcome, AuditRecord},
    ports::audit::AuditLog,
};

/// Default sink: drops every record
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardAuditLog;

impl AuditLog for DiscardAuditLog {
    fn record(&self, _record: AuditRecord) {}
}

/// Emits one `tracing` event per record, at warn level for failures
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, record: AuditRecord) {
        match &record.outcome {
            AuditOutcome::Succeeded => {
                tracing::info!(target: "audit", record = %record, "store operation");
            }
            AuditOutcome::Failed { .. } => {
                tracing::warn!(target: "audit", record = %record, "store operation failed");
            }
        }
    }
}

/// Captures records in memory so tests can assert on them.
///
/// Clones share the underlying buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered audit lines, in append order
    pub fn lines(&self) -> Vec<String> {
        self.records().iter().map(ToString::to_string).collect()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, record: AuditRecord) {
        // A poisoned buffer must not surface through the sink.
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AuditVerb;
    use std::time::Duration;

    #[test]
    fn memory_sink_keeps_append_order() {
        let sink = MemoryAuditLog::new();
        sink.record(AuditRecord::success(
            AuditVerb::Write,
            "mem://a/k".to_string(),
            Duration::from_micros(1),
        ));
        sink.record(AuditRecord::success(
            AuditVerb::Copy,
            "mem://a/k -> mem://b/k".to_string(),
            Duration::from_micros(2),
        ));

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("wrote mem://a/k"));
        assert!(lines[1].starts_with("copied mem://a/k -> mem://b/k"));
    }
}
