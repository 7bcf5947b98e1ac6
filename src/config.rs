use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tfbind"))
}

/// Resolve the config file path, honouring an explicit override
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        log::debug!("Using config file override: {}", path.display());
        return Ok(path.to_path_buf());
    }
    Ok(config_dir()?.join("config.toml"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wait: WaitSettings,
    pub drift: DriftSettings,
}

/// Polling before destructive operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            timeout_ms: 300_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSettings {
    /// Exit non-zero from `reconcile` when drift is found
    pub fail_on_drift: bool,
}

impl Config {
    /// Load the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Reject settings the wait loop cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.wait.interval_ms == 0 {
            bail!("wait.interval_ms must be greater than zero");
        }
        if self.wait.interval_ms > self.wait.timeout_ms {
            bail!(
                "wait.interval_ms ({}) exceeds wait.timeout_ms ({})",
                self.wait.interval_ms,
                self.wait.timeout_ms
            );
        }
        Ok(())
    }

    pub fn poll_config(&self) -> drift::PollConfig {
        drift::PollConfig::new(
            Duration::from_millis(self.wait.interval_ms),
            Duration::from_millis(self.wait.timeout_ms),
        )
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Could not serialize config")
    }
}
