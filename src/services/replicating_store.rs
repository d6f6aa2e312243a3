use std::sync::Arc;

use crate::{
    domain::{
        errors::ValidationError,
        value_objects::{AccessPolicy, BackendId, KeyConstraint, ObjectKey},
    },
    ports::{audit::AuditLog, storage::BlobBackend, tasks::TaskRunner},
    services::StoredObject,
};

/// Sentinel key probed by [`ReplicatingStore::available`].
const PROBE_KEY: &str = ".available";

/// A logical store fanned out over an ordered list of backends.
///
/// The first backend is the primary: reads consult it alone, and every
/// mutation must succeed there before anything else happens. The
/// remaining backends receive best-effort asynchronous replication. The
/// list is non-empty, its order is fixed for the store's lifetime, and
/// connections are shared read-only with every resolved handle.
///
/// Constructed once at configuration-load time via
/// [`StoreBuilder`](crate::StoreBuilder) and kept for the working life
/// of the process.
pub struct ReplicatingStore {
    backends: Vec<Arc<dyn BlobBackend>>,
    policy: AccessPolicy,
    constraint: KeyConstraint,
    audit: Arc<dyn AuditLog>,
    runner: Arc<dyn TaskRunner>,
}

impl ReplicatingStore {
    pub(crate) fn new(
        backends: Vec<Arc<dyn BlobBackend>>,
        policy: AccessPolicy,
        constraint: KeyConstraint,
        audit: Arc<dyn AuditLog>,
        runner: Arc<dyn TaskRunner>,
    ) -> Self {
        debug_assert!(!backends.is_empty());
        Self {
            backends,
            policy,
            constraint,
            audit,
            runner,
        }
    }

    pub fn builder() -> crate::app::StoreBuilder {
        crate::app::StoreBuilder::new()
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    pub fn primary_id(&self) -> &BackendId {
        self.backends[0].id()
    }

    /// Bind `key` to every copy of the store.
    ///
    /// Validates the key against the store's [`KeyConstraint`]; no
    /// backend I/O happens until an operation is called on the handle.
    pub fn resolve(&self, key: &str) -> Result<StoredObject, ValidationError> {
        let key = self.constraint.validate(key)?;
        Ok(StoredObject::new(
            key,
            self.backends.clone(),
            self.policy,
            Arc::clone(&self.audit),
            Arc::clone(&self.runner),
        ))
    }

    /// Liveness probe against the primary backend.
    ///
    /// Any backend error reads as "unavailable"; nothing propagates.
    /// This checks connectivity, not correctness.
    pub async fn available(&self) -> bool {
        let probe = ObjectKey::new_unchecked(PROBE_KEY);
        self.backends[0].exists(&probe).await.is_ok()
    }
}
