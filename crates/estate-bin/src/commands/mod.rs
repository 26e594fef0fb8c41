// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `login` / `logout` / `whoami`: session management
//! - `modules` / `profile`: reads for the signed-in user
//! - `roles`: role listing and permission toggles
//! - `validate`: configuration check
//! - `version`: version information

mod navigation;
mod roles;
mod session;
mod validate;
mod version;

pub use navigation::{modules, profile};
pub use roles::roles;
pub use session::{login, logout, whoami};
pub use validate::validate;
pub use version::version;

use serde::Serialize;

use estate_client::AdminConsole;
use estate_config::{ConfigLoader, ConsoleConfig};

use crate::cli::{Cli, Commands};
use crate::error::{BinError, BinResult};

/// Loads the configuration named on the command line.
///
/// A missing file yields the defaults with environment overrides applied.
pub fn load_config(cli: &Cli) -> BinResult<ConsoleConfig> {
    ConfigLoader::new()
        .load_or_default(&cli.config)
        .map_err(|e| BinError::from(e).with_context("Failed to load configuration"))
}

/// Opens the console: restores the persisted session and builds the client.
pub fn open_console(config: &ConsoleConfig) -> BinResult<AdminConsole> {
    Ok(AdminConsole::from_config(config)?)
}

/// Executes the command selected on the command line.
pub async fn execute(cli: &Cli, config: ConsoleConfig) -> BinResult<()> {
    match &cli.command {
        Commands::Validate(args) => validate::validate(cli, &config, args),
        Commands::Version => version::version(cli),
        command => {
            let console = open_console(&config)?;
            match command {
                Commands::Login(args) => session::login(&console, &config, args).await,
                Commands::Logout => session::logout(&console),
                Commands::Whoami(args) => session::whoami(&console, args),
                Commands::Modules(args) => navigation::modules(&console, args).await,
                Commands::Profile(args) => navigation::profile(&console, args).await,
                Commands::Roles(command) => roles::roles(&console, command).await,
                Commands::Validate(_) | Commands::Version => Ok(()),
            }
        }
    }
}

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> BinResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
