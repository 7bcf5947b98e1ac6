use anyhow::{Result, bail};
use drift::{Entry, Reconciliation};
use std::path::Path;

use crate::Context;
use crate::config::Config;
use crate::document::read_json;
use crate::records::Variable;

pub fn run(
    ctx: &Context,
    config: &Config,
    prior: &Path,
    observed: &Path,
    json: bool,
) -> Result<()> {
    let prior: Vec<Variable> = read_json(prior, "variable list")?;
    let observed: Vec<Variable> = read_json(observed, "variable list")?;

    let result = drift::reconcile(&prior, &observed)?;
    result.log_drift("variable");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !ctx.quiet {
        print_summary(&result, ctx.verbose > 0);
    }

    if config.drift.fail_on_drift && result.has_drift() {
        bail!(
            "drift detected: {} added, {} removed",
            result.added.len(),
            result.removed.len()
        );
    }
    Ok(())
}

fn print_summary(result: &Reconciliation<Variable>, show_kept: bool) {
    crate::ui::header("Variables");

    if !result.has_drift() {
        crate::ui::success(&format!("{} variables, no drift", result.kept.len()));
        return;
    }
    crate::ui::warn(&format!(
        "drift: {} added, {} removed",
        result.added.len(),
        result.removed.len()
    ));

    crate::ui::section("State");
    if show_kept {
        for var in &result.kept {
            crate::ui::item(' ', &describe(var));
        }
    } else if !result.kept.is_empty() {
        crate::ui::dim(&format!("{} unchanged (-v to list)", result.kept.len()));
    }
    for var in &result.added {
        crate::ui::item('+', &describe(var));
    }

    if !result.removed.is_empty() {
        crate::ui::section("Dropped");
        for var in &result.removed {
            crate::ui::item('-', &describe(var));
        }
    }
}

fn describe(var: &Variable) -> String {
    let value = if var.sensitive {
        "(sensitive)"
    } else {
        var.value.as_str()
    };
    match var.scope() {
        Some(scope) if !scope.is_empty() => format!("{} [{scope}] = {value}", var.key),
        _ => format!("{} = {value}", var.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, json).unwrap();
        path
    }

    fn ctx() -> Context {
        Context {
            verbose: 0,
            quiet: true,
        }
    }

    #[test]
    fn test_drift_fails_only_when_configured() {
        let dir = TempDir::new().unwrap();
        let prior = write(&dir, "prior.json", r#"[{"key": "A", "category": "env"}]"#);
        let observed = write(&dir, "observed.json", r#"[{"key": "B", "category": "env"}]"#);

        let mut config = Config::default();
        assert!(run(&ctx(), &config, &prior, &observed, true).is_ok());

        config.drift.fail_on_drift = true;
        let err = run(&ctx(), &config, &prior, &observed, true).unwrap_err();
        assert!(err.to_string().contains("1 added, 1 removed"));
    }

    #[test]
    fn test_duplicate_entries_are_an_error() {
        let dir = TempDir::new().unwrap();
        let prior = write(
            &dir,
            "prior.json",
            r#"[{"key": "A", "category": "env"}, {"key": "A", "category": "env"}]"#,
        );
        let observed = write(&dir, "observed.json", "[]");

        let err = run(&ctx(), &Config::default(), &prior, &observed, false).unwrap_err();
        assert!(err.to_string().contains("duplicate prior entry"));
    }

    #[test]
    fn test_describe_hides_sensitive_values() {
        let var = Variable {
            key: "TOKEN".to_string(),
            value: "s3cret".to_string(),
            category: "env".to_string(),
            sensitive: true,
            ..Default::default()
        };
        assert_eq!(describe(&var), "TOKEN [env] = (sensitive)");
    }
}
