use anyhow::Result;
use drift::{Catalog, Entity};
use serde::Deserialize;
use std::path::Path;

use crate::Context;
use crate::cli::RecordKind;
use crate::document::read_json;

/// A catalog entry. Any other fields in the listing are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

impl Entity for CatalogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Entities listed in a JSON file
pub struct FileCatalog {
    kind: &'static str,
    entries: Vec<CatalogEntry>,
}

impl FileCatalog {
    pub fn load(path: &Path, kind: &'static str) -> Result<Self> {
        let entries = read_json(path, "catalog")?;
        Ok(Self { kind, entries })
    }
}

impl Catalog for FileCatalog {
    type Entity = CatalogEntry;

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn get_by_id(&self, id: &str) -> anyhow::Result<Option<CatalogEntry>> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn list(&self) -> anyhow::Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

pub fn run(ctx: &Context, token: &str, catalog: &Path, kind: Option<RecordKind>) -> Result<()> {
    let kind = kind.map_or("entity", RecordKind::label);
    let catalog = FileCatalog::load(catalog, kind)?;

    let entity = match drift::resolve(&catalog, token) {
        Ok(entity) => entity,
        Err(e) => {
            let category = e.category();
            if category.is_user_facing() && !ctx.quiet {
                crate::ui::error(category.description());
                crate::ui::dim(category.advice());
            }
            return Err(e.into());
        }
    };

    if ctx.quiet {
        println!("{}", entity.id);
    } else {
        crate::ui::info(&format!("{kind} {token:?}"));
        crate::ui::kv("id", &entity.id);
        crate::ui::kv("name", &entity.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const OWNERS: &str = "6f1c1d3e-2b7a-4c1e-9a55-0d7a3f4b2c10";

    fn catalog(dir: &TempDir) -> FileCatalog {
        let path = dir.path().join("teams.json");
        fs::write(
            &path,
            format!(
                r#"[
                    {{"id": "{OWNERS}", "name": "owners", "visibility": "secret"}},
                    {{"id": "0b8e5f7a-91d2-4e3b-8c6f-5a4d3c2b1a09", "name": "devs"}},
                    {{"id": "c3d2e1f0-aaaa-4bbb-8ccc-ddddeeeeffff", "name": "devs"}}
                ]"#
            ),
        )
        .unwrap();
        FileCatalog::load(&path, "team").unwrap()
    }

    #[test]
    fn test_resolves_name_and_id_from_file() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);

        assert_eq!(drift::resolve(&catalog, "owners").unwrap().id, OWNERS);
        assert_eq!(drift::resolve(&catalog, OWNERS).unwrap().name, "owners");
    }

    #[test]
    fn test_ambiguous_name_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = drift::resolve(&catalog(&dir), "devs").unwrap_err();
        assert_eq!(err.category(), drift::ErrorCategory::Ambiguous);
    }

    #[test]
    fn test_run_fails_for_unknown_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        fs::write(&path, "[]").unwrap();

        let ctx = Context {
            verbose: 0,
            quiet: true,
        };
        let err = run(&ctx, "admins", &path, Some(RecordKind::Team)).unwrap_err();
        assert_eq!(err.to_string(), r#"team not found by name: "admins""#);
    }
}
