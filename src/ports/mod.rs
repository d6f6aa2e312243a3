pub mod audit;
pub mod storage;
pub mod tasks;

// Re-export all port traits for convenience
pub use audit::AuditLog;
pub use storage::BlobBackend;
pub use tasks::TaskRunner;
