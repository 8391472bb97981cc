//! credstore CLI — thin wiring over the credential library.
//!
//! All business rules live in [`credstore::auth`]; this binary only
//! parses arguments, prompts for passwords, and maps outcomes to exit
//! codes. Plaintext passwords are read via a hidden prompt (or a flag
//! for scripting) and never logged.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use credstore::auth::{authenticate, ensure_ready, CredentialStore};
use credstore::Config;

#[derive(Parser)]
#[command(
    name = "credstore",
    version,
    about = "Local credential authority backed by SQLite"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file path (overrides the config file).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the schema and seed the demo accounts (idempotent).
    Bootstrap,

    /// Check a username/password pair and print the identity.
    Login {
        username: String,

        /// Password for scripted use; omit to be prompted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Manage accounts.
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List accounts, admins first.
    List,

    /// Create an account (password must follow the complexity rules).
    Add {
        username: String,

        /// Grant the admin flag.
        #[arg(long)]
        admin: bool,

        /// Password for scripted use; omit to be prompted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete an account.
    Remove {
        username: String,

        /// Username of the operator; refuses self-deletion.
        #[arg(long)]
        acting_user: Option<String>,
    },

    /// Reset an account's password.
    Reset {
        username: String,

        /// New password for scripted use; omit to be prompted.
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let store = CredentialStore::new(&config.db_path);
    store.init()?;

    match cli.command {
        Command::Bootstrap => {
            ensure_ready(&store)?;
            println!("Store ready at {}", store.db_path().display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Login { username, password } => {
            let password = password_or_prompt(password, false)?;
            match authenticate(&store, &username, &password)? {
                Some(identity) => {
                    let badge = if identity.is_admin { " [ADMIN]" } else { "" };
                    println!("Logged in as {}{badge}", identity.username);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    // Same message for unknown user and wrong password.
                    println!("Invalid username or password.");
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Command::User { action } => run_user_action(&store, action),
    }
}

fn run_user_action(store: &CredentialStore, action: UserAction) -> Result<ExitCode> {
    match action {
        UserAction::List => {
            for (username, is_admin) in store.list_users()? {
                let badge = if is_admin { "ADMIN" } else { "USER" };
                println!(" - {username} [{badge}]");
            }
            Ok(ExitCode::SUCCESS)
        }

        UserAction::Add {
            username,
            admin,
            password,
        } => {
            let password = password_or_prompt(password, true)?;
            store
                .create_user(&username, &password, admin)
                .context("Could not create user")?;
            println!("User created.");
            Ok(ExitCode::SUCCESS)
        }

        UserAction::Remove {
            username,
            acting_user,
        } => {
            if acting_user.as_deref() == Some(username.as_str()) {
                println!("You cannot delete your own account while logged in.");
                return Ok(ExitCode::FAILURE);
            }
            if store.delete_user(&username)? {
                println!("Deleted.");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No such user.");
                Ok(ExitCode::FAILURE)
            }
        }

        UserAction::Reset { username, password } => {
            let password = password_or_prompt(password, true)?;
            if store
                .set_password(&username, &password)
                .context("Could not update password")?
            {
                println!("Password updated.");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("No such user.");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Take the password from the flag, or prompt with hidden input
/// (confirmed twice when choosing a new one).
fn password_or_prompt(flag: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match.");
    }
    prompt.interact().context("Failed to read password")
}
