use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::{
    domain::{
        errors::{BackendError, BackendResult},
        models::{AuditRecord, AuditVerb},
        value_objects::{AccessPolicy, BackendId, ObjectKey},
    },
    ports::{audit::AuditLog, storage::BlobBackend, tasks::TaskRunner},
};

/// Handle to one logical object across every copy held by the store.
///
/// Created fresh by [`ReplicatingStore::resolve`](crate::ReplicatingStore::resolve)
/// and never cached; it holds shared backend connections only, so
/// concurrent handles for the same key are cheap and independent.
///
/// Reads and existence checks consult the primary copy alone. Writes and
/// deletes complete synchronously against the primary, then fan out to
/// the secondaries as detached tasks; their outcomes are observable only
/// through the audit log.
pub struct StoredObject {
    key: ObjectKey,
    copies: Vec<Arc<dyn BlobBackend>>,
    policy: AccessPolicy,
    audit: Arc<dyn AuditLog>,
    runner: Arc<dyn TaskRunner>,
}

impl std::fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredObject")
            .field("key", &self.key)
            .field("copies", &self.copies.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl StoredObject {
    pub(crate) fn new(
        key: ObjectKey,
        copies: Vec<Arc<dyn BlobBackend>>,
        policy: AccessPolicy,
        audit: Arc<dyn AuditLog>,
        runner: Arc<dyn TaskRunner>,
    ) -> Self {
        debug_assert!(!copies.is_empty());
        Self {
            key,
            copies,
            policy,
            audit,
            runner,
        }
    }

    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    fn primary(&self) -> &Arc<dyn BlobBackend> {
        &self.copies[0]
    }

    fn secondaries(&self) -> &[Arc<dyn BlobBackend>] {
        &self.copies[1..]
    }

    /// Existence on the primary copy, verbatim and unlogged
    pub async fn exists(&self) -> BackendResult<bool> {
        self.primary().exists(&self.key).await
    }

    /// Full payload from the primary copy, or `None` when absent.
    ///
    /// An object deleted between the existence check and the read also
    /// comes back as `None`.
    pub async fn read(&self) -> BackendResult<Option<Bytes>> {
        if !self.primary().exists(&self.key).await? {
            return Ok(None);
        }
        match self.primary().read(&self.key).await {
            Err(err) if err.is_not_found() => Ok(None),
            other => other,
        }
    }

    /// Streaming variant of [`read`](StoredObject::read), with the same
    /// absence semantics
    pub async fn read_stream(
        &self,
    ) -> BackendResult<Option<BoxStream<'static, BackendResult<Bytes>>>> {
        if !self.primary().exists(&self.key).await? {
            return Ok(None);
        }
        match self.primary().read_stream(&self.key).await {
            Err(err) if err.is_not_found() => Ok(None),
            other => other,
        }
    }

    /// Feed the payload chunk-by-chunk to `consume`.
    ///
    /// Returns `Ok(false)` without invoking the callback when the object
    /// is absent.
    pub async fn read_with<F>(&self, mut consume: F) -> BackendResult<bool>
    where
        F: FnMut(Bytes),
    {
        let Some(mut stream) = self.read_stream().await? else {
            return Ok(false);
        };
        while let Some(chunk) = stream.next().await {
            consume(chunk?);
        }
        Ok(true)
    }

    /// Write the primary synchronously, then mirror to every secondary in
    /// the background.
    ///
    /// Returns as soon as the primary write completes. A primary failure
    /// is logged, re-raised, and dispatches nothing. Secondary dispatch
    /// follows list order, but execution and completion order across
    /// tasks is unspecified.
    pub async fn write(&self, payload: impl Into<Bytes>) -> BackendResult<()> {
        let payload = payload.into();
        let primary = self.primary();
        let target = primary.id().target(&self.key);
        let started = Instant::now();
        match primary.write(&self.key, payload.clone(), self.policy).await {
            Ok(()) => self.audit.record(AuditRecord::success(
                AuditVerb::Write,
                target,
                started.elapsed(),
            )),
            Err(err) => {
                self.audit.record(AuditRecord::failure(
                    AuditVerb::Write,
                    target,
                    started.elapsed(),
                    &err,
                ));
                return Err(err);
            }
        }

        for secondary in self.secondaries() {
            self.spawn_mirror_write(Arc::clone(secondary), payload.clone());
        }
        Ok(())
    }

    /// Delete the primary synchronously, then the secondaries in the
    /// background.
    ///
    /// `Ok(false)` when the object was already absent: no record is
    /// written and nothing is dispatched. Calling twice in a row yields
    /// `true` then `false`.
    pub async fn delete(&self) -> BackendResult<bool> {
        let primary = self.primary();
        if !primary.exists(&self.key).await? {
            return Ok(false);
        }

        let target = primary.id().target(&self.key);
        let started = Instant::now();
        match primary.delete(&self.key).await {
            Ok(_) => self.audit.record(AuditRecord::success(
                AuditVerb::Delete,
                target,
                started.elapsed(),
            )),
            Err(err) => {
                self.audit.record(AuditRecord::failure(
                    AuditVerb::Delete,
                    target,
                    started.elapsed(),
                    &err,
                ));
                return Err(err);
            }
        }

        for secondary in self.secondaries() {
            self.spawn_mirror_delete(Arc::clone(secondary));
        }
        Ok(true)
    }

    fn spawn_mirror_write(&self, secondary: Arc<dyn BlobBackend>, payload: Bytes) {
        let primary = Arc::clone(self.primary());
        let key = self.key.clone();
        let policy = self.policy;
        let audit = Arc::clone(&self.audit);
        self.runner.spawn(Box::pin(async move {
            let target = format!(
                "{} -> {}",
                primary.id().target(&key),
                secondary.id().target(&key)
            );
            let started = Instant::now();
            match mirror_payload(secondary.as_ref(), primary.id(), &key, payload, policy).await {
                Ok(()) => audit.record(AuditRecord::success(
                    AuditVerb::Copy,
                    target,
                    started.elapsed(),
                )),
                Err(err) => audit.record(AuditRecord::failure(
                    AuditVerb::Copy,
                    target,
                    started.elapsed(),
                    &err,
                )),
            }
        }));
    }

    fn spawn_mirror_delete(&self, secondary: Arc<dyn BlobBackend>) {
        let key = self.key.clone();
        let audit = Arc::clone(&self.audit);
        self.runner.spawn(Box::pin(async move {
            let target = secondary.id().target(&key);
            let started = Instant::now();
            let outcome = async {
                if !secondary.exists(&key).await? {
                    return Ok(false);
                }
                secondary.delete(&key).await?;
                Ok::<_, BackendError>(true)
            }
            .await;
            match outcome {
                // Already absent on this copy; mirrors the primary's
                // unlogged no-op path.
                Ok(false) => {}
                Ok(true) => audit.record(AuditRecord::success(
                    AuditVerb::Delete,
                    target,
                    started.elapsed(),
                )),
                Err(err) => audit.record(AuditRecord::failure(
                    AuditVerb::Delete,
                    target,
                    started.elapsed(),
                    &err,
                )),
            }
        }));
    }
}

/// One mirroring attempt: a native copy when the medium has one, else a
/// rewrite of the caller-supplied in-memory payload. The primary object
/// is never re-read.
async fn mirror_payload(
    secondary: &dyn BlobBackend,
    source: &BackendId,
    key: &ObjectKey,
    payload: Bytes,
    policy: AccessPolicy,
) -> BackendResult<()> {
    if secondary.copy_from(source, key, policy).await? {
        return Ok(());
    }
    secondary.write(key, payload, policy).await
}
