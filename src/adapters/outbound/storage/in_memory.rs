use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::BackendResult,
        value_objects::{AccessPolicy, BackendId, ObjectKey},
    },
    ports::storage::BlobBackend,
};

/// In-memory backend for testing and development.
///
/// Cloning shares the underlying object map, so a clone observes the
/// same objects as the original.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    id: BackendId,
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BackendId::new("mem", name),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of objects currently held
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl BlobBackend for InMemoryBackend {
    fn id(&self) -> &BackendId {
        &self.id
    }

    async fn exists(&self, key: &ObjectKey) -> BackendResult<bool> {
        Ok(self.objects.read().await.contains_key(key.as_str()))
    }

    async fn read(&self, key: &ObjectKey) -> BackendResult<Option<Bytes>> {
        Ok(self.objects.read().await.get(key.as_str()).cloned())
    }

    async fn write(
        &self,
        key: &ObjectKey,
        payload: Bytes,
        _policy: AccessPolicy,
    ) -> BackendResult<()> {
        // Memory has no visibility levels; the policy has no expression here.
        self.objects
            .write()
            .await
            .insert(key.as_str().to_string(), payload);
        Ok(())
    }

    async fn delete(&self, key: &ObjectKey) -> BackendResult<bool> {
        Ok(self.objects.write().await.remove(key.as_str()).is_some())
    }
}
