use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use tidy_rules::PassId;

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tidy.json";

/// Contents of a `tidy.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TidyConfig {
    /// Ordered pass list. Falls back to [`PassId::DEFAULT`] when absent.
    #[serde(default)]
    pub passes: Option<Vec<PassId>>,
}

impl TidyConfig {
    pub fn passes(&self) -> Vec<PassId> {
        self.passes
            .clone()
            .unwrap_or_else(|| PassId::DEFAULT.to_vec())
    }
}

pub fn parse_config(source: &str) -> Result<TidyConfig> {
    let config = serde_json::from_str(source).context("failed to parse tidy config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<TidyConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tidy config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse tidy config: {}", path.display()))
}

/// Load `path` when given, else `tidy.json` in `cwd` if it exists, else the
/// default configuration.
pub fn resolve_config(path: Option<&Path>, cwd: &Path) -> Result<TidyConfig> {
    if let Some(path) = path {
        return load_config(path);
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        return load_config(&candidate);
    }
    Ok(TidyConfig::default())
}

/// Pass list to run: explicit `--pass` flags win over the config file.
pub fn resolve_passes(cli_passes: &[PassId], config: &TidyConfig) -> Vec<PassId> {
    if cli_passes.is_empty() {
        config.passes()
    } else {
        cli_passes.to_vec()
    }
}
