// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `login`, `logout` and `whoami` commands.

use std::io::BufRead;

use anyhow::{bail, Context};
use chrono::Utc;
use tracing::warn;

use estate_client::{AdminConsole, ConsoleError};
use estate_config::ConsoleConfig;
use estate_core::LoginRequest;

use super::print_json;
use crate::cli::{LoginArgs, OutputArgs, OutputFormat};
use crate::error::{BinError, BinResult};

/// Executes the `login` command.
pub async fn login(
    console: &AdminConsole,
    config: &ConsoleConfig,
    args: &LoginArgs,
) -> BinResult<()> {
    let tenant = args
        .tenant
        .clone()
        .or_else(|| config.api.tenant_id.clone())
        .ok_or_else(|| BinError::input("no tenant given; pass --tenant or set api.tenant_id"))?;
    let password = read_password(args)?;

    let identity = console
        .login(LoginRequest::new(tenant, args.email.as_str(), password))
        .await?;

    if identity.is_expired(Utc::now()) {
        warn!("The backend issued a token that is already expired");
    }

    println!(
        "Signed in as {} ({})",
        identity.display_name(),
        identity.role.as_deref().unwrap_or("no role")
    );
    Ok(())
}

fn read_password(args: &LoginArgs) -> anyhow::Result<String> {
    if let Some(ref password) = args.password {
        return Ok(password.clone());
    }
    if !args.password_stdin {
        bail!("no password given; pass --password, set ESTATE_PASSWORD or use --password-stdin");
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("empty password on stdin");
    }
    Ok(password.to_string())
}

/// Executes the `logout` command.
pub fn logout(console: &AdminConsole) -> BinResult<()> {
    let was_signed_in = console.session().is_authenticated();
    console.logout()?;

    if was_signed_in {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

/// Executes the `whoami` command.
pub fn whoami(console: &AdminConsole, args: &OutputArgs) -> BinResult<()> {
    let identity = console
        .session()
        .identity()
        .ok_or(ConsoleError::NotAuthenticated)?;
    let permissions = identity.permissions();

    match args.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "identity": &*identity,
            "permissions": permissions,
            "expired": identity.is_expired(Utc::now()),
        })),
        OutputFormat::Text => {
            let id = if identity.id.is_empty() {
                "(no id)"
            } else {
                identity.id.as_str()
            };
            println!("User:    {}", id);
            if let Some(ref name) = identity.name {
                println!("Name:    {}", name);
            }
            if let Some(ref email) = identity.email {
                println!("Email:   {}", email);
            }
            println!("Role:    {}", identity.role.as_deref().unwrap_or("(none)"));
            if let Some(ref tenant) = identity.tenant_id {
                println!("Tenant:  {}", tenant);
            }
            if let Some(expires_at) = identity.expires_at {
                let note = if identity.is_expired(Utc::now()) {
                    " (expired)"
                } else {
                    ""
                };
                println!("Expires: {}{}", expires_at.to_rfc3339(), note);
            }

            println!();
            if permissions.is_empty() {
                println!("No module permissions");
            } else {
                println!("Module permissions:");
                for module in permissions.modules() {
                    let actions = permissions.actions(module).unwrap_or_default();
                    println!("  {:<24} {}", module, actions.join(", "));
                }
            }
            Ok(())
        }
    }
}
