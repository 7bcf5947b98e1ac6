//! Record <-> tree marshalling.
//!
//! - [`extract`]: tree -> record, used when preparing a request payload
//! - [`populate`]: record -> tree, used when writing an observed entity back
//!   into state
//!
//! Both walk the record's binding table once. The first coercion failure
//! aborts the call. A failed populate may leave the tree partially written,
//! which is acceptable because the tree is rebuilt on every invocation.

use crate::coerce::{FieldKind, FieldValue, coerce_in, coerce_out};
use crate::error::{Error, Result};
use crate::record::{Binding, Record};
use crate::tree::AttributeTree;
use crate::value::Map;

/// Build a record from the explicitly configured values of a tree.
pub fn extract<R: Record>(tree: &AttributeTree) -> Result<R> {
    let mut record = R::default();
    extract_into(tree, &mut record)?;
    Ok(record)
}

/// Copy the explicitly configured values of a tree into `record`.
///
/// Fields without an explicit value (or a non-zero default) are left as
/// they are. The `Id` field is read from the tree's identifier slot.
pub fn extract_into<R: Record>(tree: &AttributeTree, record: &mut R) -> Result<()> {
    for binding in R::bindings().iter() {
        if binding.is_id() {
            ensure_id_kind(binding)?;
            if let Some(id) = tree.id() {
                binding.write(record, FieldValue::Str(id.to_string()))?;
            }
            continue;
        }

        let Some(value) = tree.get_explicit(binding.key()) else {
            continue;
        };
        let coerced = coerce_in(value, binding.kind(), &binding.site())?;
        binding.write(record, coerced)?;
    }
    Ok(())
}

/// Write every field of `record` into the tree.
///
/// The `Id` field seeds the identifier slot and must not be empty. Absent
/// optional fields are skipped so whatever the tree already holds at that
/// key, typically the user's own configuration, survives.
pub fn populate<R: Record>(record: &R, tree: &mut AttributeTree) -> Result<()> {
    for binding in R::bindings().iter() {
        if binding.is_id() {
            ensure_id_kind(binding)?;
            match binding.read(record)? {
                FieldValue::Str(id) if !id.is_empty() => tree.set_id(id),
                _ => return Err(Error::EmptyId { record: R::KIND }),
            }
            continue;
        }

        let value = binding.read(record)?;
        if let Some(out) = coerce_out(value, binding.kind(), &binding.site())? {
            tree.set(binding.key(), out);
        }
    }
    Ok(())
}

fn ensure_id_kind<R: Record>(binding: &Binding<R>) -> Result<()> {
    match binding.kind() {
        FieldKind::Str => Ok(()),
        kind => Err(Error::IdKind {
            record: R::KIND,
            kind,
        }),
    }
}

/// Block records may not hold blocks themselves, whether or not any are set.
fn ensure_flat<N: Record>() -> Result<()> {
    match N::bindings().iter().find(|b| b.kind() == FieldKind::Blocks) {
        Some(binding) => Err(Error::NestedBlocks {
            record: N::KIND,
            field: binding.field(),
        }),
        None => Ok(()),
    }
}

/// Nested records -> one map per record, order preserved.
///
/// Inside a block `Id` is an ordinary attribute.
pub(crate) fn blocks_out<N: Record>(items: &[N]) -> Result<Vec<Map>> {
    ensure_flat::<N>()?;
    items
        .iter()
        .map(|item| {
            let mut map = Map::new();
            for binding in N::bindings().iter() {
                let value = binding.read(item)?;
                if let Some(out) = coerce_out(value, binding.kind(), &binding.site())? {
                    map.insert(binding.key().to_string(), out);
                }
            }
            Ok(map)
        })
        .collect()
}

/// One map per element -> nested records, order preserved.
pub(crate) fn blocks_in<N: Record>(maps: Vec<Map>) -> Result<Vec<N>> {
    ensure_flat::<N>()?;
    maps.into_iter()
        .map(|map| {
            let mut item = N::default();
            for binding in N::bindings().iter() {
                let Some(value) = map.get(binding.key()) else {
                    continue;
                };
                let coerced = coerce_in(value, binding.kind(), &binding.site())?;
                binding.write(&mut item, coerced)?;
            }
            Ok(item)
        })
        .collect()
}
