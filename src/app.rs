use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::outbound::{
        audit::DiscardAuditLog,
        storage::{InMemoryBackend, ObjectStoreBackend},
        tasks::TokioTaskRunner,
    },
    domain::value_objects::{AccessPolicy, BackendId, KeyConstraint},
    ports::{audit::AuditLog, storage::BlobBackend, tasks::TaskRunner},
    services::ReplicatingStore,
};

/// Declarative description of one physical backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackendConfig {
    InMemory {
        name: String,
    },
    S3 {
        bucket: String,
        region: String,
        #[serde(default)]
        access_key: Option<String>,
        #[serde(default)]
        secret_key: Option<String>,
        #[serde(default)]
        endpoint: Option<String>,
    },
}

/// Declarative store configuration.
///
/// Order matters: the first backend is the primary, the rest are
/// mirrors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backends: Vec<BackendConfig>,
    #[serde(default)]
    pub policy: AccessPolicy,
}

/// Construction-time errors
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("a replicating store needs at least one backend")]
    NoBackends,

    #[error("backend initialization failed: {message}")]
    BackendInit { message: String },
}

/// Builder wiring backends, policy, and the injected collaborators into
/// a [`ReplicatingStore`].
///
/// Every collaborator is defaulted: private policy, default key
/// constraint, a discard audit sink, and the tokio task runner.
pub struct StoreBuilder {
    backends: Vec<Arc<dyn BlobBackend>>,
    policy: AccessPolicy,
    constraint: KeyConstraint,
    audit: Arc<dyn AuditLog>,
    runner: Arc<dyn TaskRunner>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
            policy: AccessPolicy::default(),
            constraint: KeyConstraint::default(),
            audit: Arc::new(DiscardAuditLog),
            runner: Arc::new(TokioTaskRunner::new()),
        }
    }

    /// Materialize every configured backend and preset the policy
    pub fn from_config(config: StoreConfig) -> Result<Self, BuildError> {
        let mut builder = Self::new().with_policy(config.policy);
        for backend in config.backends {
            builder = builder.with_backend(materialize(backend)?);
        }
        Ok(builder)
    }

    /// Append a backend; the first one appended becomes the primary
    pub fn with_backend(mut self, backend: Arc<dyn BlobBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_key_constraint(mut self, constraint: KeyConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn with_audit_log(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_task_runner(mut self, runner: Arc<dyn TaskRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn build(self) -> Result<ReplicatingStore, BuildError> {
        if self.backends.is_empty() {
            return Err(BuildError::NoBackends);
        }
        Ok(ReplicatingStore::new(
            self.backends,
            self.policy,
            self.constraint,
            self.audit,
            self.runner,
        ))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn materialize(config: BackendConfig) -> Result<Arc<dyn BlobBackend>, BuildError> {
    match config {
        BackendConfig::InMemory { name } => Ok(Arc::new(InMemoryBackend::new(name))),
        BackendConfig::S3 {
            bucket,
            region,
            access_key,
            secret_key,
            endpoint,
        } => {
            let mut s3 = AmazonS3Builder::new()
                .with_bucket_name(bucket.clone())
                .with_region(region);
            if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
                s3 = s3
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key);
            }
            if let Some(endpoint) = endpoint {
                s3 = s3.with_endpoint(endpoint).with_allow_http(true);
            }
            let store = s3.build().map_err(|err| BuildError::BackendInit {
                message: err.to_string(),
            })?;
            Ok(Arc::new(ObjectStoreBackend::new(
                BackendId::new("s3", bucket),
                Arc::new(store),
            )))
        }
    }
}

/// In-memory store for tests and development: one backend per name, the
/// first name being the primary
pub fn create_in_memory_store(names: &[&str]) -> Result<ReplicatingStore, BuildError> {
    let mut builder = StoreBuilder::new();
    for name in names {
        builder = builder.with_backend(Arc::new(InMemoryBackend::new(*name)));
    }
    builder.build()
}
