use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use userdesk_core::{ConfigError, UserDeskConfig};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config file to operate on (default: --config, then ~/.userdesk/config.toml)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented config template
    Init(InitArgs),
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, default_path: &Path) -> Result<()> {
    let path = args.file.unwrap_or_else(|| default_path.to_path_buf());

    match args.command {
        ConfigCommands::Init(init) => {
            UserDeskConfig::init_at(&path, init.force).map_err(|err| match err {
                ConfigError::AlreadyExists { .. } => {
                    anyhow!(err).context("Use --force to overwrite an existing config")
                }
                other => anyhow!(other),
            })?;
            println!("✅ Created config at: {}", path.display());
        }
        ConfigCommands::Show => {
            let config = UserDeskConfig::load_from(&path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}
