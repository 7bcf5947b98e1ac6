//! Type coercion between tree values and record fields.
//!
//! The set of supported field kinds is deliberately small and closed. Any
//! combination not listed below is an error, never a silent skip:
//!
//! | kind            | tree value          | record field       |
//! |-----------------|---------------------|--------------------|
//! | `Str`           | string              | `String`           |
//! | `Int`           | int                 | `i64`              |
//! | `Bool`          | bool                | `bool`             |
//! | `OptInt`        | int or absent       | `Option<i64>`      |
//! | `OptBool`       | bool or absent      | `Option<bool>`     |
//! | `Blocks`        | list of maps        | `Vec<N: Record>`   |

use crate::error::{Error, Result};
use crate::value::{Map, Value};
use std::fmt;

/// Declared kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    /// Optional scalar where presence is significant
    OptInt,
    /// Optional scalar where presence is significant
    OptBool,
    /// Repeated nested block, one level deep
    Blocks,
}

impl FieldKind {
    /// Whether an absent value means "no opinion" rather than zero.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::OptInt | Self::OptBool)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::OptInt => "optional int",
            Self::OptBool => "optional bool",
            Self::Blocks => "block list",
        };
        f.write_str(name)
    }
}

/// A record field's value in transit between record and tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Bool(bool),
    OptInt(Option<i64>),
    OptBool(Option<bool>),
    Blocks(Vec<Map>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::Str,
            Self::Int(_) => FieldKind::Int,
            Self::Bool(_) => FieldKind::Bool,
            Self::OptInt(_) => FieldKind::OptInt,
            Self::OptBool(_) => FieldKind::OptBool,
            Self::Blocks(_) => FieldKind::Blocks,
        }
    }
}

/// Where a coercion happens, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    pub record: &'static str,
    pub field: &'static str,
    pub key: &'a str,
}

impl Site<'_> {
    fn coercion(&self, kind: FieldKind, found: &'static str) -> Error {
        Error::Coercion {
            record: self.record,
            field: self.field,
            key: self.key.to_string(),
            kind,
            found,
        }
    }

    pub(crate) fn mismatch(&self, kind: FieldKind, found: FieldKind) -> Error {
        Error::KindMismatch {
            record: self.record,
            field: self.field,
            kind,
            found,
        }
    }
}

/// Convert a tree value into a field value of the declared kind.
///
/// Optional kinds always come back as `Some`: the caller only coerces values
/// the tree actually holds.
pub fn coerce_in(value: &Value, kind: FieldKind, site: &Site<'_>) -> Result<FieldValue> {
    let coerced = match (kind, value) {
        (FieldKind::Str, Value::String(s)) => FieldValue::Str(s.clone()),
        (FieldKind::Int, Value::Int(i)) => FieldValue::Int(*i),
        (FieldKind::Bool, Value::Bool(b)) => FieldValue::Bool(*b),
        (FieldKind::OptInt, Value::Int(i)) => FieldValue::OptInt(Some(*i)),
        (FieldKind::OptBool, Value::Bool(b)) => FieldValue::OptBool(Some(*b)),
        (FieldKind::Blocks, Value::List(items)) => {
            let maps = items
                .iter()
                .map(|item| {
                    item.as_map()
                        .cloned()
                        .ok_or_else(|| site.coercion(kind, item.type_name()))
                })
                .collect::<Result<Vec<_>>>()?;
            FieldValue::Blocks(maps)
        }
        _ => return Err(site.coercion(kind, value.type_name())),
    };
    Ok(coerced)
}

/// Convert a field value into a tree value.
///
/// Returns `None` for an absent optional: the tree key must be left as is.
pub fn coerce_out(value: FieldValue, kind: FieldKind, site: &Site<'_>) -> Result<Option<Value>> {
    if value.kind() != kind {
        return Err(site.mismatch(kind, value.kind()));
    }

    let out = match value {
        FieldValue::Str(s) => Some(Value::String(s)),
        FieldValue::Int(i) => Some(Value::Int(i)),
        FieldValue::Bool(b) => Some(Value::Bool(b)),
        FieldValue::OptInt(i) => i.map(Value::Int),
        FieldValue::OptBool(b) => b.map(Value::Bool),
        FieldValue::Blocks(maps) => Some(Value::List(maps.into_iter().map(Value::Map).collect())),
    };
    Ok(out)
}
