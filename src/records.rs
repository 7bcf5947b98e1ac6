//! Service records exposed through the CLI.

use binding::{Bindings, Record};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// SSH key attached to a workspace, stored as a nested block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKeyRef {
    pub id: String,
    pub name: String,
}

impl Record for SshKeyRef {
    const KIND: &'static str = "SshKeyRef";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<SshKeyRef>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<SshKeyRef>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Name", |r| &r.name, |r| &mut r.name)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub description: String,
    pub terraform_version: String,
    pub working_directory: String,
    pub github_installation_id: String,
    pub oauth_token_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_all_runs: Option<bool>,
    pub speculative_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_timeout_minutes: Option<i64>,
    pub ssh_keys: Vec<SshKeyRef>,
}

impl Record for Workspace {
    const KIND: &'static str = "Workspace";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Workspace>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<Workspace>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Name", |r| &r.name, |r| &mut r.name)
                .string("Description", |r| &r.description, |r| &mut r.description)
                .string(
                    "TerraformVersion",
                    |r| &r.terraform_version,
                    |r| &mut r.terraform_version,
                )
                .string(
                    "WorkingDirectory",
                    |r| &r.working_directory,
                    |r| &mut r.working_directory,
                )
                .string(
                    "GithubInstallationId",
                    |r| &r.github_installation_id,
                    |r| &mut r.github_installation_id,
                )
                .string("OAuthTokenID", |r| &r.oauth_token_id, |r| &mut r.oauth_token_id)
                .opt_bool("AutoApply", |r| &r.auto_apply, |r| &mut r.auto_apply)
                .opt_bool("QueueAllRuns", |r| &r.queue_all_runs, |r| &mut r.queue_all_runs)
                .boolean(
                    "SpeculativeEnabled",
                    |r| &r.speculative_enabled,
                    |r| &mut r.speculative_enabled,
                )
                .opt_int(
                    "ExecutionTimeoutMinutes",
                    |r| &r.execution_timeout_minutes,
                    |r| &mut r.execution_timeout_minutes,
                )
                .blocks("SshKeys", |r| &r.ssh_keys, |r| &mut r.ssh_keys)
        })
    }
}

/// Workspace variable. Reconciled as a list: joined on key within category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variable {
    pub id: String,
    pub key: String,
    pub value: String,
    pub description: String,
    pub category: String,
    pub hcl: bool,
    pub sensitive: bool,
}

impl Record for Variable {
    const KIND: &'static str = "Variable";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Variable>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<Variable>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Key", |r| &r.key, |r| &mut r.key)
                .string("Value", |r| &r.value, |r| &mut r.value)
                .string("Description", |r| &r.description, |r| &mut r.description)
                .string("Category", |r| &r.category, |r| &mut r.category)
                .boolean("Hcl", |r| &r.hcl, |r| &mut r.hcl)
                .boolean("Sensitive", |r| &r.sensitive, |r| &mut r.sensitive)
        })
    }
}

impl drift::Entry for Variable {
    fn name(&self) -> &str {
        &self.key
    }

    fn scope(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    fn keep_value_from(&mut self, prior: &Self) {
        self.value.clone_from(&prior.value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub visibility: String,
    pub member_count: i64,
}

impl Record for Team {
    const KIND: &'static str = "Team";

    fn bindings() -> &'static Bindings<Self> {
        static BINDINGS: OnceLock<Bindings<Team>> = OnceLock::new();
        BINDINGS.get_or_init(|| {
            Bindings::<Team>::new()
                .string("Id", |r| &r.id, |r| &mut r.id)
                .string("Name", |r| &r.name, |r| &mut r.name)
                .string("Visibility", |r| &r.visibility, |r| &mut r.visibility)
                .int("MemberCount", |r| &r.member_count, |r| &mut r.member_count)
        })
    }
}

impl drift::Entity for Team {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binding::{AttributeTree, Value, extract, populate};

    fn workspace() -> Workspace {
        Workspace {
            id: "ws-9f2c".to_string(),
            name: "network-prod".to_string(),
            terraform_version: "1.9.5".to_string(),
            github_installation_id: "ghain-7x".to_string(),
            oauth_token_id: "ot-33".to_string(),
            auto_apply: Some(false),
            speculative_enabled: true,
            execution_timeout_minutes: Some(90),
            ssh_keys: vec![SshKeyRef {
                id: "sshkey-1".to_string(),
                name: "deploy".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_workspace_keys() {
        let keys: Vec<&str> = Workspace::bindings().keys().collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "name",
                "description",
                "terraform_version",
                "working_directory",
                "github_installation_id",
                "o_auth_token_id",
                "auto_apply",
                "queue_all_runs",
                "speculative_enabled",
                "execution_timeout_minutes",
                "ssh_keys",
            ]
        );
    }

    #[test]
    fn test_workspace_round_trip() {
        let mut tree = AttributeTree::new();
        populate(&workspace(), &mut tree).unwrap();

        assert_eq!(tree.id(), Some("ws-9f2c"));
        assert_eq!(tree.get("o_auth_token_id"), Some(&Value::from("ot-33")));
        assert_eq!(tree.get("auto_apply"), Some(&Value::Bool(false)));
        assert!(tree.get("queue_all_runs").is_none());
        assert_eq!(tree.blocks("ssh_keys").count(), 1);

        let back: Workspace = extract(&tree).unwrap();
        assert_eq!(back, workspace());
    }

    #[test]
    fn test_variable_entry_keeps_sensitive_value() {
        let prior = vec![Variable {
            key: "DB_PASSWORD".to_string(),
            value: "hunter2".to_string(),
            category: "env".to_string(),
            sensitive: true,
            ..Default::default()
        }];
        let observed = vec![Variable {
            value: String::new(),
            description: "rotated".to_string(),
            ..prior[0].clone()
        }];

        let result = drift::reconcile(&prior, &observed).unwrap();
        assert_eq!(result.kept[0].value, "hunter2");
        assert_eq!(result.kept[0].description, "rotated");
    }

    #[test]
    fn test_team_resolves_by_name() {
        let teams = vec![Team {
            id: "6f1c1d3e-2b7a-4c1e-9a55-0d7a3f4b2c10".to_string(),
            name: "owners".to_string(),
            ..Default::default()
        }];
        let team = drift::resolve_with(
            "team",
            "owners",
            |_| Ok(None),
            || Ok(teams.clone()),
        )
        .unwrap();
        assert_eq!(team.id, teams[0].id);
    }

    #[test]
    fn test_payload_json_uses_snake_case_and_defaults() {
        let team: Team = serde_json::from_str(r#"{"name": "devs"}"#).unwrap();
        assert_eq!(team.name, "devs");
        assert_eq!(team.member_count, 0);
        assert!(team.id.is_empty());
    }
}
