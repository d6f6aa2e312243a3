use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use object_store::{path::Path as ObjectPath, ObjectStore as ApacheObjectStore, PutPayload};

use crate::{
    domain::{
        errors::{BackendError, BackendResult},
        value_objects::{AccessPolicy, BackendId, ObjectKey},
    },
    ports::storage::BlobBackend,
};

/// Adapter exposing any Apache `object_store` implementation (S3, local
/// filesystem, in-memory, ...) as a [`BlobBackend`].
pub struct ObjectStoreBackend {
    id: BackendId,
    inner: Arc<dyn ApacheObjectStore>,
}

impl ObjectStoreBackend {
    pub fn new(id: BackendId, store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { id, inner: store }
    }

    fn backend_error(&self, key: &ObjectKey, err: object_store::Error) -> BackendError {
        let target = self.id.target(key);
        match err {
            object_store::Error::NotFound { .. } => BackendError::NotFound { target },
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => BackendError::PermissionDenied {
                target,
                message: err.to_string(),
            },
            other => BackendError::Backend {
                target,
                message: "backend call failed".to_string(),
                cause: Some(other.to_string()),
            },
        }
    }
}

#[async_trait]
impl BlobBackend for ObjectStoreBackend {
    fn id(&self) -> &BackendId {
        &self.id
    }

    async fn exists(&self, key: &ObjectKey) -> BackendResult<bool> {
        let path = ObjectPath::from(key.as_str());
        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(err) => Err(self.backend_error(key, err)),
        }
    }

    async fn read(&self, key: &ObjectKey) -> BackendResult<Option<Bytes>> {
        let path = ObjectPath::from(key.as_str());
        let result = match self.inner.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(err) => return Err(self.backend_error(key, err)),
        };
        let bytes = result
            .bytes()
            .await
            .map_err(|err| self.backend_error(key, err))?;
        Ok(Some(bytes))
    }

    async fn read_stream(
        &self,
        key: &ObjectKey,
    ) -> BackendResult<Option<BoxStream<'static, BackendResult<Bytes>>>> {
        let path = ObjectPath::from(key.as_str());
        let result = match self.inner.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(err) => return Err(self.backend_error(key, err)),
        };
        let target = self.id.target(key);
        let stream = result
            .into_stream()
            .map(move |chunk| {
                chunk.map_err(|err| BackendError::Backend {
                    target: target.clone(),
                    message: "streaming read failed".to_string(),
                    cause: Some(err.to_string()),
                })
            })
            .boxed();
        Ok(Some(stream))
    }

    async fn write(
        &self,
        key: &ObjectKey,
        payload: Bytes,
        _policy: AccessPolicy,
    ) -> BackendResult<()> {
        // object_store scopes visibility at bucket level; per-object
        // policy has no expression through this adapter.
        let path = ObjectPath::from(key.as_str());
        self.inner
            .put(&path, PutPayload::from(payload))
            .await
            .map_err(|err| self.backend_error(key, err))?;
        Ok(())
    }

    async fn delete(&self, key: &ObjectKey) -> BackendResult<bool> {
        let path = ObjectPath::from(key.as_str());
        match self.inner.delete(&path).await {
            Ok(()) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(err) => Err(self.backend_error(key, err)),
        }
    }
}
