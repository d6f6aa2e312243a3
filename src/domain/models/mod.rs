mod audit;

pub use audit::{AuditOutcome, AuditRecord, AuditVerb};
