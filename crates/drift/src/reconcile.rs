//! Drift reconciliation for externally-owned ordered collections.
//!
//! Given the collection recorded in state (prior) and the one just observed
//! from the service, produce:
//!
//! - `kept`: prior entries still observed, in prior order, carrying the
//!   observed fields (sensitive entries keep their prior value)
//! - `added`: observed entries unknown to prior, in observed order
//! - `removed`: prior entries no longer observed, in prior order
//!
//! The next persisted collection is `kept ++ added`. `removed` is diagnostic
//! only. Entries join on `(name, scope)`; a repeated join key within one
//! input is rejected rather than resolved arbitrarily.

use crate::error::{Error, Result, Side};
use serde::Serialize;
use std::collections::HashMap;

/// A member of a reconciled collection.
pub trait Entry: Clone {
    /// Logical name, the primary join key.
    fn name(&self) -> &str;

    /// Secondary join key for types where one name may exist in several
    /// scopes (e.g. a variable's category).
    fn scope(&self) -> Option<&str> {
        None
    }

    /// Sensitive entries never take their value from the wire.
    fn is_sensitive(&self) -> bool {
        false
    }

    /// Replace this entry's value with `prior`'s, leaving other fields alone.
    fn keep_value_from(&mut self, prior: &Self);
}

type JoinKey<'a> = (&'a str, Option<&'a str>);

fn join_key<E: Entry>(entry: &E) -> JoinKey<'_> {
    (entry.name(), entry.scope())
}

/// Outcome of reconciling prior state with observed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation<E> {
    pub kept: Vec<E>,
    pub added: Vec<E>,
    pub removed: Vec<E>,
}

impl<E> Default for Reconciliation<E> {
    fn default() -> Self {
        Self {
            kept: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<E: Entry> Reconciliation<E> {
    /// Whether anything was added or removed remotely.
    pub fn has_drift(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// The collection to persist: `kept` followed by `added`.
    pub fn into_state(self) -> Vec<E> {
        let mut state = self.kept;
        state.extend(self.added);
        state
    }

    /// Log every added and removed entry as drift.
    pub fn log_drift(&self, kind: &str) {
        for entry in &self.added {
            log::info!(
                "drift detected: {kind} {} exists remotely but not in state, adding it",
                describe(entry)
            );
        }
        for entry in &self.removed {
            log::info!(
                "drift detected: {kind} {} no longer exists remotely, dropping it from state",
                describe(entry)
            );
        }
    }
}

fn describe<E: Entry>(entry: &E) -> String {
    match entry.scope() {
        Some(scope) => format!("{:?} ({scope})", entry.name()),
        None => format!("{:?}", entry.name()),
    }
}

fn index<E: Entry>(entries: &[E], side: Side) -> Result<HashMap<JoinKey<'_>, usize>> {
    let mut index = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        if index.insert(join_key(entry), position).is_some() {
            return Err(Error::DuplicateEntry {
                side,
                name: entry.name().to_string(),
                scope: entry.scope().map(str::to_string),
            });
        }
    }
    Ok(index)
}

/// Reconcile `prior` against `observed`.
///
/// Fails only when a join key repeats within one input.
pub fn reconcile<E: Entry>(prior: &[E], observed: &[E]) -> Result<Reconciliation<E>> {
    let prior_index = index(prior, Side::Prior)?;
    let observed_index = index(observed, Side::Observed)?;

    let mut result = Reconciliation::default();

    for entry in prior {
        match observed_index.get(&join_key(entry)) {
            Some(&position) => {
                let mut kept = observed[position].clone();
                if entry.is_sensitive() {
                    kept.keep_value_from(entry);
                }
                result.kept.push(kept);
            }
            None => result.removed.push(entry.clone()),
        }
    }

    result.added = observed
        .iter()
        .filter(|entry| !prior_index.contains_key(&join_key(*entry)))
        .cloned()
        .collect();

    Ok(result)
}
