//! Command line definitions and dispatch.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use laberator_accounts::{AccountDirectory, AccountId, DirectoryConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "laberator")]
#[command(about = "Manage the Laberator account directory", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check whether a login is registered
    Exists { login: String },
    /// Register a new account
    Register { login: String, password: String },
    /// Check a login/password pair
    Validate { login: String, password: String },
}

impl Cli {
    /// Resolve the directory config from the config file and overrides.
    pub fn directory_config(&self) -> anyhow::Result<DirectoryConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(DirectoryConfig::default_path);
        let mut config = DirectoryConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        if let Some(database) = &self.database {
            config.database_path.clone_from(database);
        }
        Ok(config)
    }
}

/// Run one command. `Ok(false)` means a negative answer, not a failure.
pub async fn run(directory: &AccountDirectory, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Exists { login } => {
            let found = directory.exists(&login).await;
            println!("{found}");
            Ok(found)
        }
        Command::Register { login, password } => {
            let id = register(directory, &login, &password).await?;
            println!("{id} {login}");
            Ok(true)
        }
        Command::Validate { login, password } => {
            let valid = directory.validate(&login, &password).await;
            println!("{valid}");
            Ok(valid)
        }
    }
}

/// Register an account and read back the id the store assigned to it.
async fn register(
    directory: &AccountDirectory,
    login: &str,
    password: &str,
) -> anyhow::Result<AccountId> {
    directory
        .register(login, password)
        .await
        .with_context(|| format!("failed to register '{login}'"))?;
    let account = directory
        .find(login)
        .await?
        .with_context(|| format!("'{login}' missing after registration"))?;
    info!("Registered '{login}' as account {}", account.id);
    Ok(account.id)
}
