use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_QUERY: &str = "SELECT [System.Id] FROM WorkItems \
     WHERE [System.TeamProject] = @project \
     AND [System.AssignedTo] = @me \
     AND [System.State] NOT IN ('Closed', 'Done', 'Removed') \
     ORDER BY [System.ChangedDate] DESC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WibConfig {
    /// Base URL of the Azure DevOps REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Organization to query; defaults to the one in the repository's remote
    #[serde(default)]
    pub organization: Option<String>,
    /// Project to query; defaults to the one in the repository's remote
    #[serde(default)]
    pub project: Option<String>,
    /// WIQL used by `wib list` without `--query`
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Check out new branches locally
    #[serde(default)]
    pub checkout: bool,
}

fn default_api_url() -> String {
    az_devops::DEFAULT_API_URL.to_string()
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

impl Default for WibConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            organization: None,
            project: None,
            default_query: default_query(),
            checkout: false,
        }
    }
}

impl WibConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("wib")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Apply `ADO_API_URL`, `ADO_ORGANIZATION` and `ADO_PROJECT` on top of file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(api_url) = lookup("ADO_API_URL") {
            self.api_url = api_url;
        }
        if let Some(organization) = lookup("ADO_ORGANIZATION") {
            self.organization = Some(organization);
        }
        if let Some(project) = lookup("ADO_PROJECT") {
            self.project = Some(project);
        }
        self
    }
}
