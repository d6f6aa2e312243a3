use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};

use crate::domain::{
    errors::BackendResult,
    value_objects::{AccessPolicy, BackendId, ObjectKey},
};

/// Port for a single physical storage medium (cloud bucket, filesystem,
/// in-memory, ...).
///
/// Implementations are selected at configuration time and shared
/// read-only across every [`StoredObject`](crate::StoredObject) bound to
/// the store; any locking a concrete medium needs is its own concern.
/// Payloads are opaque bytes and must never pass through a text-encoding
/// transformation.
#[async_trait]
pub trait BlobBackend: Send + Sync + 'static {
    /// Identity used to render audit targets, never for routing
    fn id(&self) -> &BackendId;

    /// Check whether an object is stored under `key`
    async fn exists(&self, key: &ObjectKey) -> BackendResult<bool>;

    /// Full payload, or `None` when no object is stored under `key`
    async fn read(&self, key: &ObjectKey) -> BackendResult<Option<Bytes>>;

    /// Chunked read. The default hands the whole payload out as a single
    /// chunk; adapters over streaming media override it.
    async fn read_stream(
        &self,
        key: &ObjectKey,
    ) -> BackendResult<Option<BoxStream<'static, BackendResult<Bytes>>>> {
        Ok(self
            .read(key)
            .await?
            .map(|payload| stream::once(async move { Ok(payload) }).boxed()))
    }

    /// Store `payload` under `key` with the given visibility
    async fn write(&self, key: &ObjectKey, payload: Bytes, policy: AccessPolicy)
        -> BackendResult<()>;

    /// Remove the object under `key`. Returns true iff something was
    /// actually removed; deleting a missing object is not an error.
    async fn delete(&self, key: &ObjectKey) -> BackendResult<bool>;

    /// Native server-side copy from another backend, for media that have
    /// one. `Ok(false)` means unsupported, and the caller falls back to
    /// rewriting the in-memory payload.
    async fn copy_from(
        &self,
        source: &BackendId,
        key: &ObjectKey,
        policy: AccessPolicy,
    ) -> BackendResult<bool> {
        let _ = (source, key, policy);
        Ok(false)
    }
}
