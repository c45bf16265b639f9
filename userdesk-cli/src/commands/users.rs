//! One-shot collection commands: list, add, update, delete
//!
//! ```bash
//! userdesk list --json | jq '.[] | {id, email}'
//! userdesk add --name "Ada" --email ada@example.com --department Eng
//! userdesk delete 3 --yes
//! ```

use std::io::IsTerminal;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use inquire::Confirm;
use tracing::info;
use userdesk_core::view::CONFIRM_DELETE_TEXT;
use userdesk_core::{FormState, UserApi, UserId, UserRecord};

use super::Connection;
use crate::ui;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

/// Fields of a record, validated like the interactive form
#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Department
    #[arg(long)]
    pub department: String,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub record: RecordArgs,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// ID of the user to replace
    pub id: UserId,

    #[command(flatten)]
    pub record: RecordArgs,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// ID of the user to delete
    pub id: UserId,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

impl RecordArgs {
    fn into_form(self, id: Option<UserId>) -> FormState {
        FormState {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
        }
    }
}

fn get_output_format(output: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        output
    }
}

/// Tree-style listing, one record per branch
pub fn format_human(users: &[UserRecord]) -> String {
    let mut out = format!("┌─ {} users\n│\n", users.len());
    if users.is_empty() {
        out.push_str("└─ (no users)\n");
        return out;
    }
    for (i, user) in users.iter().enumerate() {
        let is_last = i == users.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let cont = if is_last { "   " } else { "│  " };
        out.push_str(&format!("{} #{} {}\n", prefix, user.id, user.name));
        out.push_str(&format!("{}{}", cont, user.email));
        if !user.department.is_empty() {
            out.push_str(&format!(" · {}", user.department));
        }
        out.push('\n');
    }
    out
}

pub async fn run_list(conn: &Connection, args: ListArgs) -> Result<()> {
    let api = conn.client()?;
    let format = get_output_format(args.output, args.json);

    let users = ui::with_spinner("Fetching users", "Fetched users", api.list_users())
        .await
        .context("Error fetching users")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
        OutputFormat::Quiet => {
            for user in &users {
                println!("{}", user.id);
            }
        }
        OutputFormat::Human => print!("{}", format_human(&users)),
    }
    Ok(())
}

pub async fn run_add(conn: &Connection, args: AddArgs) -> Result<()> {
    let body = args.record.into_form(None).validate()?;
    let api = conn.client()?;

    let created = ui::with_spinner("Adding user", "User added", api.create_user(&body))
        .await
        .context("Error adding user")?;

    info!(id = %created.id, "added user");
    println!("✓ Added {} (server id: {})", created.name, created.id);
    Ok(())
}

pub async fn run_update(conn: &Connection, args: UpdateArgs) -> Result<()> {
    let record = args.record.into_form(Some(args.id)).validate_record()?;
    let api = conn.client()?;

    ui::with_spinner("Updating user", "User updated", api.update_user(&record))
        .await
        .context("Error updating user")?;

    info!(id = %record.id, "updated user");
    println!("✓ Updated user {}", record.id);
    Ok(())
}

pub async fn run_delete(conn: &Connection, args: DeleteArgs) -> Result<()> {
    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(anyhow!(
                "Refusing to delete user {} without confirmation. Pass --yes",
                args.id
            ));
        }
        let confirmed = Confirm::new(CONFIRM_DELETE_TEXT)
            .with_default(false)
            .with_help_message(&format!("user {}", args.id))
            .prompt()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let api = conn.client()?;
    ui::with_spinner("Deleting user", "User deleted", api.delete_user(args.id))
        .await
        .context("Error deleting user")?;

    info!(id = %args.id, "deleted user");
    println!("✓ Deleted user {}", args.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, name: &str, dept: &str) -> UserRecord {
        UserRecord {
            id: UserId(id),
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            department: dept.to_string(),
        }
    }

    #[test]
    fn test_format_human_tree() {
        let out = format_human(&[user(1, "A", "Ops"), user(2, "B", "")]);
        assert!(out.starts_with("┌─ 2 users"));
        assert!(out.contains("├─ #1 A\n│  a@x.com · Ops\n"));
        assert!(out.contains("└─ #2 B\n   b@x.com\n"));
    }

    #[test]
    fn test_format_human_empty() {
        assert!(format_human(&[]).contains("(no users)"));
    }

    #[test]
    fn test_json_flag_wins() {
        assert_eq!(
            get_output_format(OutputFormat::Quiet, true),
            OutputFormat::Json
        );
        assert_eq!(
            get_output_format(OutputFormat::Quiet, false),
            OutputFormat::Quiet
        );
    }

    #[test]
    fn test_record_args_validate_like_form() {
        let args = RecordArgs {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            department: "Ops".to_string(),
        };
        assert!(args.into_form(None).validate().is_err());
    }
}
