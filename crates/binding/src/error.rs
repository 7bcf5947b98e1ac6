//! Error types for record/tree binding.
//!
//! Every variant here is a schema or programming error, never a user error.
//! A binding failure aborts the whole extract/populate call: a silently
//! dropped field would show up later as corrupted state, not as a crash.

use crate::coerce::FieldKind;
use thiserror::Error;

/// Errors that can occur while moving data between records and trees.
#[derive(Debug, Error)]
pub enum Error {
    /// A tree value cannot be represented in the field's declared kind
    #[error("{record}.{field}: cannot coerce {found} at key `{key}` into {kind}")]
    Coercion {
        /// Record type being bound
        record: &'static str,
        /// Record field name
        field: &'static str,
        /// Tree key derived from the field name
        key: String,
        /// Declared field kind
        kind: FieldKind,
        /// Type name of the offending tree value
        found: &'static str,
    },

    /// An accessor produced a value of a different kind than it declared
    #[error("{record}.{field}: accessor produced {found} for a {kind} field")]
    KindMismatch {
        /// Record type being bound
        record: &'static str,
        /// Record field name
        field: &'static str,
        /// Declared field kind
        kind: FieldKind,
        /// Kind actually produced
        found: FieldKind,
    },

    /// A repeated block was declared inside another repeated block
    #[error("{record}.{field}: nested blocks are only supported one level deep")]
    NestedBlocks {
        /// Record type being bound
        record: &'static str,
        /// Record field name
        field: &'static str,
    },

    /// The `Id` field is declared with a non-string kind
    #[error("{record}.Id must be a string field, found {kind}")]
    IdKind {
        /// Record type being bound
        record: &'static str,
        /// Declared field kind
        kind: FieldKind,
    },

    /// Populate was asked to write a record without an identifier
    #[error("cannot populate {record}: identifier is empty")]
    EmptyId {
        /// Record type being bound
        record: &'static str,
    },
}

impl Error {
    /// Name of the record type the error was raised for.
    pub fn record(&self) -> &'static str {
        match self {
            Error::Coercion { record, .. }
            | Error::KindMismatch { record, .. }
            | Error::NestedBlocks { record, .. }
            | Error::IdKind { record, .. }
            | Error::EmptyId { record } => record,
        }
    }
}

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, Error>;
