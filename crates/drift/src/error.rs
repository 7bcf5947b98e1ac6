//! Error types for resolution and reconciliation.
//!
//! Resolution errors are ordinary outcomes a user can act on, so each one
//! names the entity kind and the token that was searched for.

use std::fmt;
use thiserror::Error;

/// Categories of errors, for deciding how to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Nothing matched the token
    NotFound,
    /// More than one entity matched a name
    Ambiguous,
    /// Input collections violate the join-key contract
    Conflict,
    /// The external service call failed
    Backend,
}

impl ErrorCategory {
    /// Whether this is an expected, user-facing outcome rather than a fault.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::NotFound | Self::Ambiguous)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::Ambiguous => "Ambiguous name",
            Self::Conflict => "Conflicting entries",
            Self::Backend => "Service call failed",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::NotFound => "Check the name or id for typos",
            Self::Ambiguous => "Reference the entity by its id instead of its name",
            Self::Conflict => "Give each entry a unique name within its scope",
            Self::Backend => "Check connectivity and credentials, then retry",
        }
    }
}

/// Which input of a reconciliation an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Previously persisted state
    Prior,
    /// Freshly observed remote state
    Observed,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Prior => f.write_str("prior"),
            Side::Observed => f.write_str("observed"),
        }
    }
}

/// Errors from resolution, reconciliation and fan-in updates.
#[derive(Debug, Error)]
pub enum Error {
    /// A well-formed identifier matched nothing
    #[error("{kind} not found by id: {id}")]
    NotFoundById {
        /// Entity kind searched for
        kind: &'static str,
        /// Identifier searched for
        id: String,
    },

    /// A name matched nothing
    #[error("{kind} not found by name: {name:?}")]
    NotFoundByName {
        /// Entity kind searched for
        kind: &'static str,
        /// Name searched for
        name: String,
    },

    /// A name matched more than one entity
    #[error(
        "{count} {kind} entries are named {name:?} ({ids}); use the id instead",
        count = .candidates.len(),
        ids = .candidates.join(", ")
    )]
    Ambiguous {
        /// Entity kind searched for
        kind: &'static str,
        /// Name searched for
        name: String,
        /// Identifiers of every match
        candidates: Vec<String>,
    },

    /// The same join key appears twice in one input
    #[error("duplicate {side} entry {name:?}{scope}", scope = scope_suffix(.scope.as_deref()))]
    DuplicateEntry {
        /// Input the duplicate was found in
        side: Side,
        /// Entry name
        name: String,
        /// Entry scope, when the entry type has one
        scope: Option<String>,
    },

    /// The external collaborator failed
    #[error("{kind}: {source:#}")]
    Backend {
        /// Entity kind or collection being accessed
        kind: &'static str,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },
}

fn scope_suffix(scope: Option<&str>) -> String {
    scope.map(|s| format!(" in scope {s:?}")).unwrap_or_default()
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFoundById { .. } | Error::NotFoundByName { .. } => ErrorCategory::NotFound,
            Error::Ambiguous { .. } => ErrorCategory::Ambiguous,
            Error::DuplicateEntry { .. } => ErrorCategory::Conflict,
            Error::Backend { .. } => ErrorCategory::Backend,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    pub(crate) fn backend(kind: &'static str, source: anyhow::Error) -> Self {
        Error::Backend { kind, source }
    }
}

/// Result type for drift operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = Error::NotFoundById {
            kind: "team",
            id: "x".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.category().is_user_facing());
        assert!(err.is_not_found());

        let err = Error::backend("team", anyhow::anyhow!("connection reset"));
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(!err.category().is_user_facing());
        assert_eq!(err.to_string(), "team: connection reset");
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = Error::Ambiguous {
            kind: "workspace",
            name: "prod".to_string(),
            candidates: vec!["ws-a".to_string(), "ws-b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "2 workspace entries are named \"prod\" (ws-a, ws-b); use the id instead"
        );
    }

    #[test]
    fn test_duplicate_message() {
        let err = Error::DuplicateEntry {
            side: Side::Observed,
            name: "TF_LOG".to_string(),
            scope: Some("env".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "duplicate observed entry \"TF_LOG\" in scope \"env\""
        );

        let err = Error::DuplicateEntry {
            side: Side::Prior,
            name: "alice".to_string(),
            scope: None,
        };
        assert_eq!(err.to_string(), "duplicate prior entry \"alice\"");
    }
}
