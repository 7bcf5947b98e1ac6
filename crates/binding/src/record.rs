//! Record trait and per-type binding tables.
//!
//! Instead of discovering fields at runtime, every record type declares its
//! fields once as a [`Bindings`] table: field name, derived tree key, and a
//! typed accessor. The accessor variant fixes the field's [`FieldKind`], so a
//! table cannot claim a kind its field does not have.
//!
//! ```
//! use binding::{Bindings, Record};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct SshKey {
//!     id: String,
//!     name: String,
//! }
//!
//! impl Record for SshKey {
//!     const KIND: &'static str = "SshKey";
//!
//!     fn bindings() -> &'static Bindings<Self> {
//!         static BINDINGS: OnceLock<Bindings<SshKey>> = OnceLock::new();
//!         BINDINGS.get_or_init(|| {
//!             Bindings::<SshKey>::new()
//!                 .string("Id", |r| &r.id, |r| &mut r.id)
//!                 .string("Name", |r| &r.name, |r| &mut r.name)
//!         })
//!     }
//! }
//!
//! assert_eq!(SshKey::bindings().keys().collect::<Vec<_>>(), vec!["id", "name"]);
//! ```

use crate::coerce::{FieldKind, FieldValue, Site};
use crate::error::Result;
use crate::marshal::{blocks_in, blocks_out};
use crate::naming::to_tree_key;
use crate::value::Map;
use std::fmt;

/// Name of the field that maps to the tree's identifier slot.
pub const ID_FIELD: &str = "Id";

/// A statically-typed value with a declared binding table.
pub trait Record: Default + Sized + 'static {
    /// Record type name used in error messages
    const KIND: &'static str;

    /// The record's binding table, built once per type.
    fn bindings() -> &'static Bindings<Self>;
}

type ReadBlocks<R> = Box<dyn Fn(&R) -> Result<Vec<Map>> + Send + Sync>;
type WriteBlocks<R> = Box<dyn Fn(&mut R, Vec<Map>) -> Result<()> + Send + Sync>;

enum Accessor<R> {
    Str(fn(&R) -> &String, fn(&mut R) -> &mut String),
    Int(fn(&R) -> &i64, fn(&mut R) -> &mut i64),
    Bool(fn(&R) -> &bool, fn(&mut R) -> &mut bool),
    OptInt(fn(&R) -> &Option<i64>, fn(&mut R) -> &mut Option<i64>),
    OptBool(fn(&R) -> &Option<bool>, fn(&mut R) -> &mut Option<bool>),
    Blocks(ReadBlocks<R>, WriteBlocks<R>),
}

/// One `(field, key, accessor)` entry of a binding table.
pub struct Binding<R> {
    field: &'static str,
    key: String,
    accessor: Accessor<R>,
}

impl<R: Record> Binding<R> {
    /// Record field name, e.g. `GithubInstallationId`.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Tree key, e.g. `github_installation_id`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> FieldKind {
        match self.accessor {
            Accessor::Str(..) => FieldKind::Str,
            Accessor::Int(..) => FieldKind::Int,
            Accessor::Bool(..) => FieldKind::Bool,
            Accessor::OptInt(..) => FieldKind::OptInt,
            Accessor::OptBool(..) => FieldKind::OptBool,
            Accessor::Blocks(..) => FieldKind::Blocks,
        }
    }

    /// Whether this field feeds the tree's identifier slot.
    pub fn is_id(&self) -> bool {
        self.field == ID_FIELD
    }

    pub fn site(&self) -> Site<'_> {
        Site {
            record: R::KIND,
            field: self.field,
            key: &self.key,
        }
    }

    /// Read the field out of a record.
    pub fn read(&self, record: &R) -> Result<FieldValue> {
        let value = match &self.accessor {
            Accessor::Str(get, _) => FieldValue::Str(get(record).clone()),
            Accessor::Int(get, _) => FieldValue::Int(*get(record)),
            Accessor::Bool(get, _) => FieldValue::Bool(*get(record)),
            Accessor::OptInt(get, _) => FieldValue::OptInt(*get(record)),
            Accessor::OptBool(get, _) => FieldValue::OptBool(*get(record)),
            Accessor::Blocks(read, _) => FieldValue::Blocks(read(record)?),
        };
        Ok(value)
    }

    /// Write a value of the field's kind into a record.
    pub fn write(&self, record: &mut R, value: FieldValue) -> Result<()> {
        match (&self.accessor, value) {
            (Accessor::Str(_, set), FieldValue::Str(v)) => *set(record) = v,
            (Accessor::Int(_, set), FieldValue::Int(v)) => *set(record) = v,
            (Accessor::Bool(_, set), FieldValue::Bool(v)) => *set(record) = v,
            (Accessor::OptInt(_, set), FieldValue::OptInt(v)) => *set(record) = v,
            (Accessor::OptBool(_, set), FieldValue::OptBool(v)) => *set(record) = v,
            (Accessor::Blocks(_, write), FieldValue::Blocks(maps)) => write(record, maps)?,
            (_, other) => return Err(self.site().mismatch(self.kind(), other.kind())),
        }
        Ok(())
    }
}

impl<R> fmt::Debug for Binding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.field)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// The ordered binding table of a record type.
pub struct Bindings<R> {
    fields: Vec<Binding<R>>,
}

impl<R: Record> Default for Bindings<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Bindings<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn push(mut self, field: &'static str, accessor: Accessor<R>) -> Self {
        self.fields.push(Binding {
            field,
            key: to_tree_key(field),
            accessor,
        });
        self
    }

    /// Bind a `String` field.
    pub fn string(
        self,
        field: &'static str,
        get: fn(&R) -> &String,
        set: fn(&mut R) -> &mut String,
    ) -> Self {
        self.push(field, Accessor::Str(get, set))
    }

    /// Bind an `i64` field.
    pub fn int(self, field: &'static str, get: fn(&R) -> &i64, set: fn(&mut R) -> &mut i64) -> Self {
        self.push(field, Accessor::Int(get, set))
    }

    /// Bind a `bool` field.
    pub fn boolean(
        self,
        field: &'static str,
        get: fn(&R) -> &bool,
        set: fn(&mut R) -> &mut bool,
    ) -> Self {
        self.push(field, Accessor::Bool(get, set))
    }

    /// Bind an `Option<i64>` field.
    pub fn opt_int(
        self,
        field: &'static str,
        get: fn(&R) -> &Option<i64>,
        set: fn(&mut R) -> &mut Option<i64>,
    ) -> Self {
        self.push(field, Accessor::OptInt(get, set))
    }

    /// Bind an `Option<bool>` field.
    pub fn opt_bool(
        self,
        field: &'static str,
        get: fn(&R) -> &Option<bool>,
        set: fn(&mut R) -> &mut Option<bool>,
    ) -> Self {
        self.push(field, Accessor::OptBool(get, set))
    }

    /// Bind a `Vec<N>` of nested blocks.
    ///
    /// `N` itself may only contain scalar fields.
    pub fn blocks<N: Record>(
        self,
        field: &'static str,
        get: fn(&R) -> &Vec<N>,
        set: fn(&mut R) -> &mut Vec<N>,
    ) -> Self {
        let read: ReadBlocks<R> = Box::new(move |record: &R| blocks_out(get(record)));
        let write: WriteBlocks<R> = Box::new(move |record: &mut R, maps: Vec<Map>| {
            *set(record) = blocks_in::<N>(maps)?;
            Ok(())
        });
        self.push(field, Accessor::Blocks(read, write))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding<R>> {
        self.fields.iter()
    }

    /// Look up a binding by record field name.
    pub fn get(&self, field: &str) -> Option<&Binding<R>> {
        self.fields.iter().find(|b| b.field == field)
    }

    /// Tree keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Binding::key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{KeyRef, Project};

    #[test]
    fn test_keys_follow_naming() {
        let keys: Vec<_> = Project::bindings().keys().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "name",
                "github_installation_id",
                "run_count",
                "locked",
                "max_runs",
                "auto_apply",
                "ssh_keys",
            ]
        );
    }

    #[test]
    fn test_kinds_follow_accessors() {
        let bindings = Project::bindings();
        assert_eq!(bindings.get("Id").unwrap().kind(), FieldKind::Str);
        assert!(bindings.get("Id").unwrap().is_id());
        assert_eq!(bindings.get("MaxRuns").unwrap().kind(), FieldKind::OptInt);
        assert_eq!(bindings.get("SshKeys").unwrap().kind(), FieldKind::Blocks);
        assert!(bindings.get("Nope").is_none());
    }

    #[test]
    fn test_read_write_field() {
        let bindings = Project::bindings();
        let mut project = Project::default();

        let name = bindings.get("Name").unwrap();
        name.write(&mut project, FieldValue::Str("core".to_string()))
            .unwrap();
        assert_eq!(project.name, "core");
        assert_eq!(
            name.read(&project).unwrap(),
            FieldValue::Str("core".to_string())
        );

        let err = name.write(&mut project, FieldValue::Int(3)).unwrap_err();
        assert!(err.to_string().contains("Project.Name"));
    }

    #[test]
    fn test_blocks_accessor_converts_nested_records() {
        let bindings = Project::bindings();
        let project = Project {
            ssh_keys: vec![KeyRef {
                id: "sshkey-1".to_string(),
                name: "deploy".to_string(),
            }],
            ..Default::default()
        };

        let FieldValue::Blocks(maps) = bindings.get("SshKeys").unwrap().read(&project).unwrap()
        else {
            panic!("expected blocks");
        };
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0]["id"].as_str(), Some("sshkey-1"));
        assert_eq!(maps[0]["name"].as_str(), Some("deploy"));
    }
}
