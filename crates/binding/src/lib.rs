//! # binding
//!
//! Moves data between a provider's dynamic attribute tree and the typed
//! records exchanged with the remote service.
//!
//! - [`to_tree_key`] translates `CapitalizedWords` field names into
//!   `lower_snake` tree keys
//! - [`coerce`] converts between tree values and record field values for a
//!   small, closed set of field kinds
//! - [`extract`] and [`populate`] walk a record's [`Bindings`] table to go
//!   tree -> record and record -> tree
//!
//! ## Example
//!
//! ```
//! use binding::{AttributeTree, Bindings, Record, extract, populate};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Team {
//!     id: String,
//!     name: String,
//!     sso_enabled: Option<bool>,
//! }
//!
//! impl Record for Team {
//!     const KIND: &'static str = "Team";
//!
//!     fn bindings() -> &'static Bindings<Self> {
//!         static BINDINGS: OnceLock<Bindings<Team>> = OnceLock::new();
//!         BINDINGS.get_or_init(|| {
//!             Bindings::<Team>::new()
//!                 .string("Id", |r| &r.id, |r| &mut r.id)
//!                 .string("Name", |r| &r.name, |r| &mut r.name)
//!                 .opt_bool("SsoEnabled", |r| &r.sso_enabled, |r| &mut r.sso_enabled)
//!         })
//!     }
//! }
//!
//! let mut config = AttributeTree::new();
//! config.set("name", "owners");
//! let payload: Team = extract(&config).unwrap();
//! assert_eq!(payload.sso_enabled, None);
//!
//! let observed = Team { id: "team-1".into(), name: "owners".into(), sso_enabled: Some(false) };
//! let mut state = AttributeTree::new();
//! populate(&observed, &mut state).unwrap();
//! assert_eq!(state.id(), Some("team-1"));
//! assert_eq!(state.get("sso_enabled").and_then(|v| v.as_bool()), Some(false));
//! ```

#![warn(clippy::all)]

pub mod coerce;
pub mod error;
pub mod marshal;
pub mod naming;
pub mod record;
pub mod tree;
pub mod value;

#[cfg(test)]
mod testing;

pub use coerce::{FieldKind, FieldValue, Site, coerce_in, coerce_out};
pub use error::{Error, Result};
pub use marshal::{extract, extract_into, populate};
pub use naming::to_tree_key;
pub use record::{Binding, Bindings, ID_FIELD, Record};
pub use tree::{AttributeTree, Lookup, Presence};
pub use value::{Map, Value};
