//! # drift
//!
//! The parts of a declarative provider that deal with remote truth:
//!
//! - [`resolve`]: turn a name-or-id token into exactly one entity
//! - [`reconcile`]: merge persisted and observed collections, keeping the
//!   user's ordering and sensitive values, and classify drift
//! - [`Membership`]: serialized read-modify-write for fan-in resources that
//!   share one remote collection
//! - [`wait_until_gone`]: bounded, best-effort polling before deletions
//!
//! ## Example
//!
//! ```
//! use drift::{Entry, reconcile};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct EnvVar { key: String, value: String, sensitive: bool }
//!
//! impl Entry for EnvVar {
//!     fn name(&self) -> &str { &self.key }
//!     fn is_sensitive(&self) -> bool { self.sensitive }
//!     fn keep_value_from(&mut self, prior: &Self) { self.value = prior.value.clone(); }
//! }
//!
//! let var = |key: &str, value: &str| EnvVar { key: key.into(), value: value.into(), sensitive: false };
//! let prior = vec![var("A", "1"), var("B", "2")];
//! let observed = vec![var("B", "2"), var("C", "3")];
//!
//! let result = reconcile(&prior, &observed).unwrap();
//! assert_eq!(result.removed, vec![var("A", "1")]);
//! assert_eq!(result.into_state(), vec![var("B", "2"), var("C", "3")]);
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod fanin;
pub mod reconcile;
pub mod resolve;
pub mod wait;

pub use error::{Error, ErrorCategory, Result, Side};
pub use fanin::{FanInGuard, FanInLock, Membership, SharedCollection};
pub use reconcile::{Entry, Reconciliation, reconcile};
pub use resolve::{Catalog, Entity, is_id, resolve, resolve_with};
pub use wait::{CancelToken, PollConfig, WaitOutcome, wait_until_gone};
