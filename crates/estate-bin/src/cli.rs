// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `login` / `logout` / `whoami`: session management
//! - `modules`: navigation visible to the signed-in user
//! - `profile`: the signed-in user's profile
//! - `roles`: list, show and create roles, toggle a grant, assign roles to users
//! - `validate`: validate the configuration file
//! - `version`: show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use estate_config::LoggingConfig;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Estate console: sign in, browse permitted modules and manage role grants.
#[derive(Parser, Debug)]
#[command(
    name = "estate",
    author = "Sylvex <contact@sylvex.io>",
    version = estate_core::VERSION,
    about = "Command-line console for the estate administration backend",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (defaults apply when it does not exist)
    #[arg(
        short,
        long,
        default_value = "estate.yaml",
        env = "ESTATE_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides `logging.level`
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact); overrides `logging.format`
    #[arg(long, env = "ESTATE_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and persist the session token
    Login(LoginArgs),

    /// Sign out and remove the persisted token
    Logout,

    /// Show the signed-in identity and its module permissions
    Whoami(OutputArgs),

    /// List the modules the signed-in user may open
    Modules(ModulesArgs),

    /// Show the signed-in user's profile
    Profile(OutputArgs),

    /// Manage roles and their permissions
    #[command(subcommand)]
    Roles(RolesCommand),

    /// Validate the configuration file
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

/// Role management subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RolesCommand {
    /// List roles
    List(OutputArgs),

    /// Show a role's grants over the module catalog
    Show(RoleShowArgs),

    /// Grant the pair if the role lacks it, revoke it otherwise
    Toggle(RoleToggleArgs),

    /// Create a role without grants
    Create(RoleCreateArgs),

    /// Give a user a role
    AssignUser(UserRoleArgs),

    /// Take a role away from a user
    RemoveUser(UserRoleArgs),
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `login` command.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Tenant identifier (defaults to `api.tenant_id` from configuration)
    #[arg(short, long, env = "ESTATE_TENANT_ID")]
    pub tenant: Option<String>,

    /// Password
    #[arg(long, env = "ESTATE_PASSWORD", hide_env_values = true, conflicts_with = "password_stdin")]
    pub password: Option<String>,

    /// Read the password from stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Output selection shared by read commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `modules` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ModulesArgs {
    /// Show each module's actions
    #[arg(short, long)]
    pub actions: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `roles show`.
#[derive(Args, Debug, Clone)]
pub struct RoleShowArgs {
    /// Role identifier
    pub role_id: i64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `roles toggle`.
#[derive(Args, Debug, Clone)]
pub struct RoleToggleArgs {
    /// Role identifier
    pub role_id: i64,

    /// Module identifier
    pub module_id: i64,

    /// Action identifier
    pub action_id: i64,
}

/// Arguments for `roles create`.
#[derive(Args, Debug, Clone)]
pub struct RoleCreateArgs {
    /// Role name
    pub name: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `roles assign-user` and `roles remove-user`.
#[derive(Args, Debug, Clone)]
pub struct UserRoleArgs {
    /// User identifier
    pub user_id: String,

    /// Role identifier
    pub role_id: i64,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Fail when the configuration file does not exist
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<estate_config::LogFormat> for LogFormat {
    fn from(format: estate_config::LogFormat) -> Self {
        match format {
            estate_config::LogFormat::Text => LogFormat::Text,
            estate_config::LogFormat::Json => LogFormat::Json,
            estate_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Check if verbose logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Get the effective log level from flags, then configuration.
    pub fn effective_log_level<'a>(&'a self, logging: &LoggingConfig) -> &'a str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            self.log_level
                .as_deref()
                .unwrap_or_else(|| logging.level.as_str())
        }
    }

    /// Get the effective log format from flags, then configuration.
    pub fn effective_log_format(&self, logging: &LoggingConfig) -> LogFormat {
        self.log_format.unwrap_or_else(|| logging.format.into())
    }
}

// =============================================================================
// Tests
// =============================================================================
