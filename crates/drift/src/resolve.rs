//! Name-or-id resolution.
//!
//! Users may reference an entity either by its identifier or by its human
//! name. A token that parses as an identifier is looked up directly; anything
//! else is matched by name against the full listing. The three failure modes
//! stay distinct:
//!
//! - identifier with no match: [`Error::NotFoundById`]
//! - name with no match: [`Error::NotFoundByName`]
//! - name with several matches: [`Error::Ambiguous`], listing every candidate
//!
//! Identifiers use one fixed lexical format everywhere: the canonical
//! hyphenated UUID (`8-4-4-4-12` hex digits, 36 characters).

use crate::error::{Error, Result};
use uuid::Uuid;

/// Length of a canonical hyphenated UUID.
const ID_LEN: usize = 36;

/// Something that can be referenced by id or by name.
pub trait Entity {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Source of entities of one kind, usually backed by the service client.
pub trait Catalog {
    type Entity: Entity;

    /// Entity kind used in error messages, e.g. "team"
    fn kind(&self) -> &'static str;

    /// Fetch by identifier. `Ok(None)` means the service has no such entity.
    fn get_by_id(&self, id: &str) -> anyhow::Result<Option<Self::Entity>>;

    /// List every entity of this kind.
    fn list(&self) -> anyhow::Result<Vec<Self::Entity>>;
}

/// Whether `token` is in the identifier format.
pub fn is_id(token: &str) -> bool {
    token.len() == ID_LEN && Uuid::try_parse(token).is_ok()
}

/// Resolve a token against a catalog.
pub fn resolve<C: Catalog + ?Sized>(catalog: &C, token: &str) -> Result<C::Entity> {
    resolve_with(
        catalog.kind(),
        token,
        |id| catalog.get_by_id(id),
        || catalog.list(),
    )
}

/// Resolve a token with explicit lookup functions.
///
/// `lookup_by_id` is only called for identifier tokens and `list_all` only
/// for names; neither is called more than once.
pub fn resolve_with<E, I, L>(
    kind: &'static str,
    token: &str,
    lookup_by_id: I,
    list_all: L,
) -> Result<E>
where
    E: Entity,
    I: FnOnce(&str) -> anyhow::Result<Option<E>>,
    L: FnOnce() -> anyhow::Result<Vec<E>>,
{
    if is_id(token) {
        log::debug!("resolving {kind} {token} by id");
        return lookup_by_id(token)
            .map_err(|e| Error::backend(kind, e))?
            .ok_or_else(|| Error::NotFoundById {
                kind,
                id: token.to_string(),
            });
    }

    log::debug!("resolving {kind} {token:?} by name");
    let mut matches: Vec<E> = list_all()
        .map_err(|e| Error::backend(kind, e))?
        .into_iter()
        .filter(|entity| entity.name() == token)
        .collect();

    match matches.len() {
        0 => Err(Error::NotFoundByName {
            kind,
            name: token.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::Ambiguous {
            kind,
            name: token.to_string(),
            candidates: matches.iter().map(|e| e.id().to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const ID_A: &str = "6f1c1d3e-2b7a-4c1e-9a55-0d7a3f4b2c10";
    const ID_B: &str = "0b8e5f7a-91d2-4e3b-8c6f-5a4d3c2b1a09";
    const ID_C: &str = "c3d2e1f0-aaaa-4bbb-8ccc-ddddeeeeffff";
    const MISSING: &str = "11111111-2222-4333-8444-555555555555";

    #[derive(Debug, Clone, PartialEq)]
    struct Team {
        id: String,
        name: String,
    }

    impl Entity for Team {
        fn id(&self) -> &str {
            &self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
    }

    struct Teams {
        teams: Vec<Team>,
        lists: Cell<u32>,
    }

    impl Teams {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                teams: entries
                    .iter()
                    .map(|(id, name)| Team {
                        id: id.to_string(),
                        name: name.to_string(),
                    })
                    .collect(),
                lists: Cell::new(0),
            }
        }
    }

    impl Catalog for Teams {
        type Entity = Team;

        fn kind(&self) -> &'static str {
            "team"
        }

        fn get_by_id(&self, id: &str) -> anyhow::Result<Option<Team>> {
            Ok(self.teams.iter().find(|t| t.id == id).cloned())
        }

        fn list(&self) -> anyhow::Result<Vec<Team>> {
            self.lists.set(self.lists.get() + 1);
            Ok(self.teams.clone())
        }
    }

    fn catalog() -> Teams {
        Teams::new(&[(ID_A, "owners"), (ID_B, "devs"), (ID_C, "devs")])
    }

    #[test]
    fn test_is_id() {
        assert!(is_id(ID_A));
        assert!(is_id(&ID_A.to_uppercase()));
        assert!(!is_id("owners"));
        assert!(!is_id("team-abc123"));
        assert!(!is_id(&ID_A.replace('-', "")));
        assert!(!is_id(&format!("{{{ID_A}}}")));
    }

    #[test]
    fn test_resolve_by_id() {
        let teams = catalog();
        let team = resolve(&teams, ID_B).unwrap();
        assert_eq!(team.name, "devs");
        assert_eq!(teams.lists.get(), 0);
    }

    #[test]
    fn test_missing_id_is_not_found_by_id() {
        let err = resolve(&catalog(), MISSING).unwrap_err();
        assert!(matches!(err, Error::NotFoundById { kind: "team", ref id } if id == MISSING));
    }

    #[test]
    fn test_resolve_by_unique_name() {
        let team = resolve(&catalog(), "owners").unwrap();
        assert_eq!(team.id, ID_A);
    }

    #[test]
    fn test_missing_name_is_not_found_by_name() {
        let err = resolve(&catalog(), "admins").unwrap_err();
        assert!(matches!(err, Error::NotFoundByName { ref name, .. } if name == "admins"));
    }

    #[test]
    fn test_duplicate_name_is_ambiguous() {
        let err = resolve(&catalog(), "devs").unwrap_err();
        let Error::Ambiguous { candidates, .. } = &err else {
            panic!("expected ambiguity, got {err:?}");
        };
        assert_eq!(candidates, &vec![ID_B.to_string(), ID_C.to_string()]);

        let msg = err.to_string();
        assert!(msg.contains(ID_B));
        assert!(msg.contains(ID_C));
        assert!(msg.contains("use the id instead"));
    }

    #[test]
    fn test_backend_failure_is_wrapped_with_kind() {
        let err = resolve_with::<Team, _, _>(
            "variable set",
            "shared",
            |_| unreachable!("names never hit the id lookup"),
            || Err(anyhow::anyhow!("503 service unavailable")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Backend { kind: "variable set", .. }));
        assert_eq!(err.to_string(), "variable set: 503 service unavailable");
    }
}
