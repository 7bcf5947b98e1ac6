use anyhow::{Context as _, Result};
use binding::{AttributeTree, Record};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::Context;
use crate::cli::RecordKind;
use crate::document::{TreeDocument, read_json};
use crate::records::{SshKeyRef, Team, Variable, Workspace};

pub fn extract(_ctx: &Context, kind: RecordKind, tree: &Path) -> Result<()> {
    let doc = TreeDocument::load(tree)?;
    let payload = extract_document(kind, doc)?;
    log::info!("extracted {} from {}", kind.label(), tree.display());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn populate(
    _ctx: &Context,
    kind: RecordKind,
    payload: &Path,
    state: Option<&Path>,
) -> Result<()> {
    let record: serde_json::Value = read_json(payload, "record payload")?;
    let doc = match state {
        Some(path) => TreeDocument::load(path)?,
        None => TreeDocument::default(),
    };
    let doc = populate_document(kind, record, doc)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Extract the record of `kind` held by `doc` as its JSON payload
pub fn extract_document(kind: RecordKind, doc: TreeDocument) -> Result<serde_json::Value> {
    let tree = doc.into_tree();
    match kind {
        RecordKind::Workspace => extract_as::<Workspace>(&tree),
        RecordKind::Variable => extract_as::<Variable>(&tree),
        RecordKind::Team => extract_as::<Team>(&tree),
        RecordKind::SshKey => extract_as::<SshKeyRef>(&tree),
    }
}

/// Write a JSON record payload of `kind` into `doc`
pub fn populate_document(
    kind: RecordKind,
    payload: serde_json::Value,
    doc: TreeDocument,
) -> Result<TreeDocument> {
    let mut tree = doc.into_tree();
    match kind {
        RecordKind::Workspace => populate_as::<Workspace>(payload, &mut tree)?,
        RecordKind::Variable => populate_as::<Variable>(payload, &mut tree)?,
        RecordKind::Team => populate_as::<Team>(payload, &mut tree)?,
        RecordKind::SshKey => populate_as::<SshKeyRef>(payload, &mut tree)?,
    }
    Ok(TreeDocument::from_tree(tree))
}

fn extract_as<R: Record + Serialize>(tree: &AttributeTree) -> Result<serde_json::Value> {
    let record: R = binding::extract(tree)?;
    serde_json::to_value(&record).with_context(|| format!("Could not serialize {}", R::KIND))
}

fn populate_as<R: Record + DeserializeOwned>(
    payload: serde_json::Value,
    tree: &mut AttributeTree,
) -> Result<()> {
    let record: R = serde_json::from_value(payload)
        .with_context(|| format!("Payload is not a valid {}", R::KIND))?;
    binding::populate(&record, tree)?;
    log::debug!("populated {} into {} attributes", R::KIND, tree.len());
    Ok(())
}
