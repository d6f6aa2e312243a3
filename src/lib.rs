//! Key-addressed binary object store with best-effort replication.
//!
//! A [`ReplicatingStore`] binds one logical store to an ordered list of
//! [`BlobBackend`]s. The first backend is the primary: reads consult it
//! alone, and writes and deletes must succeed there before the call
//! returns. The same operation is then mirrored to every remaining
//! backend by detached background tasks, with one [`AuditRecord`] per
//! attempt. Partial replication failures never surface through the API;
//! they are visible only in the audit log.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Domain types - value objects, audit records, errors
pub use domain::{
    AccessPolicy,
    AuditOutcome,
    AuditRecord,
    AuditVerb,
    BackendError,
    BackendId,
    BackendResult,
    KeyConstraint,
    ObjectKey,
    ValidationError,
};

// Port traits - the seams backends, sinks, and executors plug into
pub use ports::{AuditLog, BlobBackend, TaskRunner};

// Core services
pub use services::{ReplicatingStore, StoredObject};

// Construction surface
pub use app::{BackendConfig, BuildError, StoreBuilder, StoreConfig, create_in_memory_store};

// Bundled adapters
pub use adapters::outbound::{
    audit::{DiscardAuditLog, MemoryAuditLog, TracingAuditLog},
    storage::{InMemoryBackend, ObjectStoreBackend},
    tasks::TokioTaskRunner,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AccessPolicy, AuditLog, BlobBackend, InMemoryBackend, KeyConstraint, ObjectKey,
        ObjectStoreBackend, ReplicatingStore, StoreBuilder, StoreConfig, StoredObject,
        TaskRunner, TokioTaskRunner, create_in_memory_store,
    };
}
