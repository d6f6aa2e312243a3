use crate::domain::models::AuditRecord;

/// Port for the audit record sink.
///
/// `record` is infallible by signature: a sink that cannot append must
/// swallow its own failure rather than mask the outcome of the store
/// operation being recorded. Appends happen from concurrent replication
/// tasks, so implementations must tolerate them without interleaving
/// partial records.
pub trait AuditLog: Send + Sync + 'static {
    fn record(&self, record: AuditRecord);
}
