use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{ClientOptions, DEFAULT_ENDPOINT};
use crate::error::ConfigError;
use crate::state::CreateIdPolicy;

/// Template written by `userdesk config init`
pub const CONFIG_TEMPLATE: &str = r#"# userdesk configuration

[api]
# Collection resource; single records live at <endpoint>/{id}
endpoint = "https://jsonplaceholder.typicode.com/users"
# Per-request timeout in seconds (omit for no timeout)
# timeout_secs = 30
# Skip TLS certificate verification
insecure = false

[ui]
# "sequential": new records get collection length + 1
# "server": keep the id returned by the server
create_ids = "sequential"
"#;

/// Configuration loaded from ~/.userdesk/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDeskConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub insecure: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub create_ids: CreateIdPolicy,
}

impl UserDeskConfig {
    /// Directory holding the config file and the TUI log: ~/.userdesk
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".userdesk")
    }

    /// Get config file path: ~/.userdesk/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> PathBuf {
        Self::config_dir().join("userdesk.log")
    }

    /// Load from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the commented template to `path`
    pub fn init_at(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        write_file(path, CONFIG_TEMPLATE)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        write_file(path, &self.to_toml()?)
    }

    /// Priority: explicit value (flag/env) > config file > default
    pub fn resolve_endpoint(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.api.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn client_options(&self, insecure_flag: bool) -> ClientOptions {
        ClientOptions {
            timeout: self.api.timeout_secs.map(Duration::from_secs),
            insecure: insecure_flag || self.api.insecure,
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = UserDeskConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, UserDeskConfig::default());
        assert_eq!(config.resolve_endpoint(None), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_template_parses() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        UserDeskConfig::init_at(&path, false).unwrap();

        let config = UserDeskConfig::load_from(&path).unwrap();
        assert_eq!(config.api.endpoint.as_deref(), Some(DEFAULT_ENDPOINT));
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.ui.create_ids, CreateIdPolicy::Sequential);

        assert!(matches!(
            UserDeskConfig::init_at(&path, false),
            Err(ConfigError::AlreadyExists { .. })
        ));
        UserDeskConfig::init_at(&path, true).unwrap();
    }

    #[test]
    fn test_endpoint_priority() {
        let config = UserDeskConfig {
            api: ApiConfig {
                endpoint: Some("http://float-box:3030/users".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.resolve_endpoint(None), "http://float-box:3030/users");
        assert_eq!(
            config.resolve_endpoint(Some("http://localhost/users")),
            "http://localhost/users"
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\ncreate_ids = \"random\"\n").unwrap();
        assert!(matches!(
            UserDeskConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_round_trip_keeps_timeout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = UserDeskConfig::default();
        config.api.timeout_secs = Some(5);
        config.ui.create_ids = CreateIdPolicy::Server;
        config.save_to(&path).unwrap();

        let loaded = UserDeskConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.client_options(false).timeout,
            Some(Duration::from_secs(5))
        );
    }
}
