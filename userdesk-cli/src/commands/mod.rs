//! Command implementations for the userdesk CLI

pub mod config;
pub mod users;

use std::path::Path;

use anyhow::{Context, Result};
use userdesk_core::{ClientOptions, CreateIdPolicy, HttpUserApi, UserDeskConfig};

pub use config::run_config;
pub use users::{run_add, run_delete, run_list, run_update};

/// Resolved connection settings shared by every command
#[derive(Debug, Clone)]
pub struct Connection {
    pub endpoint: String,
    pub options: ClientOptions,
    pub id_policy: CreateIdPolicy,
}

impl Connection {
    /// Priority: flag/env > config.toml > default
    pub fn resolve(config: &UserDeskConfig, endpoint: Option<&str>, insecure: bool) -> Self {
        Self {
            endpoint: config.resolve_endpoint(endpoint),
            options: config.client_options(insecure),
            id_policy: config.ui.create_ids,
        }
    }

    /// Read the config file at `path` (missing = defaults), then resolve
    pub fn load(path: &Path, endpoint: Option<&str>, insecure: bool) -> Result<Self> {
        let config = UserDeskConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        Ok(Self::resolve(&config, endpoint, insecure))
    }

    pub fn client(&self) -> Result<HttpUserApi> {
        HttpUserApi::new(&self.endpoint, &self.options)
            .with_context(|| format!("Failed to build HTTP client for {}", self.endpoint))
    }
}
