//! Layered configuration: built-in defaults, TOML files, then environment.

use crate::error::ConfigError;
use crate::search::DEFAULT_RESULT_LIMIT;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project-level config file, looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = "deal-discovery.toml";

/// Prefix for environment overrides, e.g. `DEAL_DISCOVERY_API__BASE_URL`.
pub const ENV_PREFIX: &str = "DEAL_DISCOVERY_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
}

/// Where the analysis API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Ranking limit and per-branch deadlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub result_limit: usize,
    /// Deadline for the market sizing and audience insights branches.
    pub analytic_timeout_secs: u64,
    /// Deadline for the general deal search branch.
    pub general_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            analytic_timeout_secs: 60,
            general_timeout_secs: 45,
        }
    }
}

impl SearchConfig {
    pub const fn analytic_timeout(&self) -> Duration {
        Duration::from_secs(self.analytic_timeout_secs)
    }

    pub const fn general_timeout(&self) -> Duration {
        Duration::from_secs(self.general_timeout_secs)
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `DEAL_DISCOVERY_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project file `./deal-discovery.toml`
    /// 4. Global file `$XDG_CONFIG_HOME/deal-discovery/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(&figment)
    }

    /// Extract from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    /// `$XDG_CONFIG_HOME/deal-discovery/config.toml`, or the platform equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("deal-discovery").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use std::io::Write;

    #[test]
    fn defaults_match_branch_deadlines() {
        let config = Config::default();
        check!(config.search.result_limit == 6);
        check!(config.search.analytic_timeout() == Duration::from_secs(60));
        check!(config.search.general_timeout() == Duration::from_secs(45));
    }

    #[test]
    fn toml_overrides_defaults_partially() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://deals.example.com\"\n\n[search]\nresult_limit = 10"
        )
        .unwrap();

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file.path()));
        let config = Config::from_figment(&figment).unwrap();

        check!(config.api.base_url == "https://deals.example.com");
        check!(config.api.connect_timeout_secs == 10);
        check!(config.search.result_limit == 10);
        check!(config.search.general_timeout_secs == 45);
    }

    #[test]
    fn invalid_values_are_reported() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string("[search]\nresult_limit = \"lots\""));
        let err = Config::from_figment(&figment).unwrap_err();
        check!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn environment_beats_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                "[search]\nresult_limit = 3\ngeneral_timeout_secs = 30",
            )?;
            jail.create_file("explicit.toml", "[search]\nresult_limit = 4\n[api]\nconnect_timeout_secs = 2")?;
            jail.set_env("DEAL_DISCOVERY_SEARCH__RESULT_LIMIT", "9");

            let config = Config::load(Some(Path::new("explicit.toml"))).map_err(|e| e.to_string())?;
            check!(config.search.result_limit == 9);
            check!(config.search.general_timeout_secs == 30);
            check!(config.api.connect_timeout_secs == 2);
            Ok(())
        });
    }

    #[test]
    fn global_config_path_names_the_app() {
        if let Some(path) = Config::global_config_path() {
            check!(path.to_string_lossy().contains("deal-discovery"));
        }
    }
}
