//! userdesk - manage a remote user collection from the terminal
//!
//! Provides:
//! - An interactive screen to add, edit and delete users (`tui`, the default)
//! - One-shot collection commands (`list`, `add`, `update`, `delete`)
//! - Configuration management (`config`)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use userdesk_core::{UserApi, UserDeskConfig};

mod commands;
mod tracing_setup;
mod tui;
mod ui;

use commands::Connection;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "userdesk",
    author,
    version,
    about = "Manage a remote user collection over HTTP",
    long_about = "Browse, add, edit and delete users held by a REST collection resource. \
                  Runs an interactive screen by default; subcommands cover scripting."
)]
struct Cli {
    /// Collection endpoint (single records live at <endpoint>/{id})
    #[arg(long, env = "USERDESK_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Config file (default: ~/.userdesk/config.toml)
    #[arg(long, env = "USERDESK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for LLM/script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive user management (default)
    Tui,
    /// List all users
    List(commands::users::ListArgs),
    /// Create a user
    Add(commands::users::AddArgs),
    /// Replace a user's fields
    Update(commands::users::UpdateArgs),
    /// Delete a user
    Delete(commands::users::DeleteArgs),
    /// Manage userdesk configuration (init, show, path)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let tracing_config = TracingConfig { debug: cli.debug };
    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        tracing_setup::init_file(&tracing_config, &UserDeskConfig::log_path())?;
    } else {
        tracing_setup::init(&tracing_config).ok();
    }

    // Initialize UI quiet mode from flag, env var, and TTY detection
    ui::init_quiet_mode(cli.quiet);

    let config_path = cli.config.unwrap_or_else(UserDeskConfig::config_path);
    let connect = || Connection::load(&config_path, cli.endpoint.as_deref(), cli.insecure);
    match command {
        Commands::Tui => run_tui(connect()?).await?,
        Commands::List(args) => commands::run_list(&connect()?, args).await?,
        Commands::Add(args) => commands::run_add(&connect()?, args).await?,
        Commands::Update(args) => commands::run_update(&connect()?, args).await?,
        Commands::Delete(args) => commands::run_delete(&connect()?, args).await?,
        // No config load here, so a broken config file can still be fixed
        Commands::Config(args) => commands::run_config(args, &config_path)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

async fn run_tui(conn: Connection) -> Result<()> {
    let api: Arc<dyn UserApi> = Arc::new(conn.client()?);
    info!(endpoint = %conn.endpoint, policy = ?conn.id_policy, "starting tui");
    let app = tui::App::new(api, conn.id_policy, conn.endpoint);
    tui::run(app).await
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
