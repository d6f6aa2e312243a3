use serde::{Deserialize, Serialize};

/// Store-wide visibility applied to every write, on every backend.
///
/// Fixed at store construction; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicy {
    /// Objects readable only by the storing principal
    #[default]
    Private,
    /// Objects readable by anyone able to name them
    PublicRead,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_most_restrictive() {
        assert_eq!(AccessPolicy::default(), AccessPolicy::Private);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&AccessPolicy::PublicRead).unwrap(),
            "\"public-read\""
        );
        let policy: AccessPolicy = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(policy, AccessPolicy::Private);
    }
}
