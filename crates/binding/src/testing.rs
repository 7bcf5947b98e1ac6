//! Records shared by the crate's unit tests.

use crate::record::{Bindings, Record};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRef {
    pub id: String,
    pub name: String,
}

impl Record for KeyRef {
    const KIND: &'static str = "KeyRef";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<KeyRef>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<KeyRef>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Name", |r| &r.name, |r| &mut r.name)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub github_installation_id: String,
    pub run_count: i64,
    pub locked: bool,
    pub max_runs: Option<i64>,
    pub auto_apply: Option<bool>,
    pub ssh_keys: Vec<KeyRef>,
}

impl Record for Project {
    const KIND: &'static str = "Project";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Project>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<Project>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Name", |r| &r.name, |r| &mut r.name)
                .string(
                    "GithubInstallationId",
                    |r| &r.github_installation_id,
                    |r| &mut r.github_installation_id,
                )
                .int("RunCount", |r| &r.run_count, |r| &mut r.run_count)
                .boolean("Locked", |r| &r.locked, |r| &mut r.locked)
                .opt_int("MaxRuns", |r| &r.max_runs, |r| &mut r.max_runs)
                .opt_bool("AutoApply", |r| &r.auto_apply, |r| &mut r.auto_apply)
                .blocks("SshKeys", |r| &r.ssh_keys, |r| &mut r.ssh_keys)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inner {
    pub keys: Vec<KeyRef>,
}

impl Record for Inner {
    const KIND: &'static str = "Inner";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Inner>> = OnceLock::new();
        BINDINGS.get_or_init(|| Bindings::<Inner>::new().blocks("Keys", |r| &r.keys, |r| &mut r.keys))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outer {
    pub id: String,
    pub inner: Vec<Inner>,
}

impl Record for Outer {
    const KIND: &'static str = "Outer";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Outer>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<Outer>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .blocks("Inner", |r| &r.inner, |r| &mut r.inner)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadId {
    pub id: i64,
}

impl Record for BadId {
    const KIND: &'static str = "BadId";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<BadId>> = OnceLock::new();
        BINDINGS.get_or_init(|| Bindings::<BadId>::new().int("Id", |r| &r.id, |r| &mut r.id))
    }
}
