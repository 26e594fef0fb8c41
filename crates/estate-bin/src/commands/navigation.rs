// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `modules` and `profile` commands.

use estate_auth::ModuleAccess;
use estate_client::AdminConsole;

use super::print_json;
use crate::cli::{ModulesArgs, OutputArgs, OutputFormat};
use crate::error::BinResult;

/// Executes the `modules` command.
pub async fn modules(console: &AdminConsole, args: &ModulesArgs) -> BinResult<()> {
    let access = console.navigation().await?;

    if args.format == OutputFormat::Json {
        return print_json(access.modules());
    }

    match access {
        ModuleAccess::EmptyAccess => {
            println!("No module permissions on this account");
        }
        ModuleAccess::Visible(modules) if modules.is_empty() => {
            println!("No readable modules");
        }
        ModuleAccess::Visible(modules) => {
            for module in &modules {
                println!("{:>4}  {}", module.id.get(), module.name);
                if args.actions {
                    for action in &module.actions {
                        println!("      {:>4}  {}", action.id.get(), action.name);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Executes the `profile` command.
pub async fn profile(console: &AdminConsole, args: &OutputArgs) -> BinResult<()> {
    let profile = console.profile().await?;

    match args.format {
        OutputFormat::Json => print_json(&*profile),
        OutputFormat::Text => {
            println!("Name:   {}", profile.full_name());
            println!("Email:  {}", profile.email);
            println!("Roles:  {}", profile.roles.join(", "));
            if !profile.module_permissions.is_empty() {
                println!();
                println!("Module permissions:");
                for (module, actions) in &profile.module_permissions {
                    println!("  {:<24} {}", module, actions.join(", "));
                }
            }
            Ok(())
        }
    }
}
