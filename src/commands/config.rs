use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::ui;

pub fn run(_ctx: &Context, cmd: ConfigCommand, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(path),
        ConfigCommand::Validate => validate(path),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let poll = config.poll_config();

    ui::header("Configuration");
    ui::kv("file", &path.display().to_string());
    if !path.exists() {
        ui::dim("(not found, showing defaults)");
    }

    ui::section("Wait");
    ui::kv("interval", &format!("{:?}", poll.interval));
    ui::kv("timeout", &format!("{:?}", poll.timeout));
    ui::kv("max checks", &poll.max_checks().to_string());

    ui::section("Drift");
    ui::kv("fail_on_drift", &config.drift.fail_on_drift.to_string());

    println!();
    ui::dim(&config.to_toml()?);
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    config.validate()?;
    ui::success(&format!("{} is valid", path.display()));
    Ok(())
}
