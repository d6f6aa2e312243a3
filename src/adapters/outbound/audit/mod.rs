mod sinks;

pub use sinks::{DiscardAuditLog, MemoryAuditLog, TracingAuditLog};
