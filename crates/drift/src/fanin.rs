//! Serialized read-modify-write for fan-in resources.
//!
//! A fan-in resource family has many independent instances that each rewrite
//! one shared remote collection, e.g. N "team member" resources that each PUT
//! the whole membership list of one team. Two of them applying concurrently
//! would both read the old list and the second write would drop the first
//! one's change.
//!
//! [`FanInLock`] guards the whole round trip: read the full collection from the
//! service, compute the new collection, write it back. The lock is held across
//! both service calls, not just the local computation. It is process-wide;
//! share one instance (via `Arc`) between every [`Membership`] of a family.

use crate::error::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A named process-wide lock for one fan-in resource family.
#[derive(Debug)]
pub struct FanInLock {
    name: &'static str,
    inner: Mutex<()>,
}

impl FanInLock {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(()),
        }
    }

    /// The resource family this lock serializes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Block until the lock is held.
    ///
    /// A panic in another holder does not leave the remote collection in a
    /// state the next holder can't read, so poisoning is ignored.
    pub fn acquire(&self) -> FanInGuard<'_> {
        log::trace!("acquiring fan-in lock {}", self.name);
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        FanInGuard {
            name: self.name,
            _guard: guard,
        }
    }
}

/// Proof that a [`FanInLock`] is held. Released on drop.
#[derive(Debug)]
pub struct FanInGuard<'a> {
    name: &'static str,
    _guard: MutexGuard<'a, ()>,
}

impl FanInGuard<'_> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for FanInGuard<'_> {
    fn drop(&mut self) {
        log::trace!("released fan-in lock {}", self.name);
    }
}

/// A remote collection rewritten as a whole, keyed by its owner.
pub trait SharedCollection: Send + Sync {
    type Member: Clone + PartialEq;

    /// Read the full collection of `owner`.
    fn read(&self, owner: &str) -> anyhow::Result<Vec<Self::Member>>;

    /// Replace the full collection of `owner`.
    fn write(&self, owner: &str, members: &[Self::Member]) -> anyhow::Result<()>;
}

/// Add/remove single members of a shared collection without losing updates.
pub struct Membership<C> {
    lock: Arc<FanInLock>,
    collection: C,
}

impl<C: SharedCollection> Membership<C> {
    pub fn new(lock: Arc<FanInLock>, collection: C) -> Self {
        Self { lock, collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Current members of `owner`. Reads alone do not take the lock.
    pub fn members(&self, owner: &str) -> Result<Vec<C::Member>> {
        self.collection
            .read(owner)
            .map_err(|e| Error::backend(self.lock.name(), e))
    }

    /// Whether `member` currently belongs to `owner`.
    pub fn contains(&self, owner: &str, member: &C::Member) -> Result<bool> {
        Ok(self.members(owner)?.contains(member))
    }

    /// Ensure `member` belongs to `owner`.
    ///
    /// Returns `true` if the collection was rewritten.
    pub fn add(&self, owner: &str, member: C::Member) -> Result<bool> {
        self.modify(owner, |members| {
            if members.contains(&member) {
                return false;
            }
            members.push(member);
            true
        })
    }

    /// Ensure `member` does not belong to `owner`.
    ///
    /// Returns `true` if the collection was rewritten.
    pub fn remove(&self, owner: &str, member: &C::Member) -> Result<bool> {
        self.modify(owner, |members| {
            let before = members.len();
            members.retain(|m| m != member);
            members.len() != before
        })
    }

    fn modify<F>(&self, owner: &str, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Vec<C::Member>) -> bool,
    {
        let _guard = self.lock.acquire();

        let mut members = self
            .collection
            .read(owner)
            .map_err(|e| Error::backend(self.lock.name(), e))?;

        if !change(&mut members) {
            log::debug!("{} of {owner}: already up to date", self.lock.name());
            return Ok(false);
        }

        self.collection
            .write(owner, &members)
            .map_err(|e| Error::backend(self.lock.name(), e))?;
        log::debug!(
            "{} of {owner}: wrote {} members",
            self.lock.name(),
            members.len()
        );
        Ok(true)
    }
}
