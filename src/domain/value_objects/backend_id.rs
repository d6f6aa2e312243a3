use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ObjectKey;

/// Identity of a physical backend, used to render human-readable audit
/// targets. Never consulted for routing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendId {
    scheme: String,
    name: String,
}

impl BackendId {
    pub fn new(scheme: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            name: name.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `scheme://name/key`, the target field of audit records
    pub fn target(&self, key: &ObjectKey) -> String {
        format!("{}://{}/{}", self.scheme, self.name, key)
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_format() {
        let id = BackendId::new("s3", "backups");
        let key = ObjectKey::new("data/file").unwrap();
        assert_eq!(id.target(&key), "s3://backups/data/file");
        assert_eq!(id.to_string(), "s3://backups");
    }
}
