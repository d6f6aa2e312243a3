use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::errors::BackendError;

/// What a store operation attempted, in audit-line vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditVerb {
    Write,
    Delete,
    Copy,
}

impl AuditVerb {
    fn past_tense(self) -> &'static str {
        match self {
            AuditVerb::Write => "wrote",
            AuditVerb::Delete => "deleted",
            AuditVerb::Copy => "copied",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            AuditVerb::Write => "failed to write",
            AuditVerb::Delete => "failed to delete",
            AuditVerb::Copy => "failed to copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Succeeded,
    /// Error message plus its stringified cause chain
    Failed { detail: String },
}

/// One attempted operation against one backend target.
///
/// Records are appended independently; concurrent replication tasks give
/// no ordering guarantee between them.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub at: DateTime<Utc>,
    pub verb: AuditVerb,
    pub target: String,
    pub outcome: AuditOutcome,
    pub elapsed: Duration,
}

impl AuditRecord {
    pub fn success(verb: AuditVerb, target: String, elapsed: Duration) -> Self {
        Self {
            at: Utc::now(),
            verb,
            target,
            outcome: AuditOutcome::Succeeded,
            elapsed,
        }
    }

    pub fn failure(verb: AuditVerb, target: String, elapsed: Duration, error: &BackendError) -> Self {
        Self {
            at: Utc::now(),
            verb,
            target,
            outcome: AuditOutcome::Failed {
                detail: error.trace(),
            },
            elapsed,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == AuditOutcome::Succeeded
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AuditOutcome::Succeeded => write!(
                f,
                "{} {} ({:?})",
                self.verb.past_tense(),
                self.target,
                self.elapsed
            ),
            AuditOutcome::Failed { detail } => write!(
                f,
                "{} {} ({:?}): {}",
                self.verb.failure(),
                self.target,
                self.elapsed,
                detail
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_line() {
        let record = AuditRecord::success(
            AuditVerb::Write,
            "mem://a/data/file".to_string(),
            Duration::from_micros(41),
        );
        assert_eq!(record.to_string(), "wrote mem://a/data/file (41µs)");
        assert!(record.succeeded());
    }

    #[test]
    fn test_failure_line_carries_cause_chain() {
        let error = BackendError::Backend {
            target: "mem://b/k".to_string(),
            message: "write rejected".to_string(),
            cause: Some("connection reset".to_string()),
        };
        let record = AuditRecord::failure(
            AuditVerb::Copy,
            "mem://a/k -> mem://b/k".to_string(),
            Duration::from_micros(10),
            &error,
        );
        let line = record.to_string();
        assert!(line.starts_with("failed to copy mem://a/k -> mem://b/k"));
        assert!(line.contains("caused by: connection reset"));
        assert!(!record.succeeded());
    }
}
