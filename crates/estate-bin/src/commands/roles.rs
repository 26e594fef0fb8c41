// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `roles` commands.

use estate_auth::PermissionChange;
use estate_client::AdminConsole;
use estate_core::{ActionId, ModuleId, RoleId};

use super::print_json;
use crate::cli::{
    OutputArgs, OutputFormat, RoleCreateArgs, RoleShowArgs, RoleToggleArgs, RolesCommand,
    UserRoleArgs,
};
use crate::error::{BinError, BinResult};

/// Executes a `roles` subcommand.
pub async fn roles(console: &AdminConsole, command: &RolesCommand) -> BinResult<()> {
    match command {
        RolesCommand::List(args) => list(console, args).await,
        RolesCommand::Show(args) => show(console, args).await,
        RolesCommand::Toggle(args) => toggle(console, args).await,
        RolesCommand::Create(args) => create(console, args).await,
        RolesCommand::AssignUser(args) => assign_user(console, args).await,
        RolesCommand::RemoveUser(args) => remove_user(console, args).await,
    }
}

async fn list(console: &AdminConsole, args: &OutputArgs) -> BinResult<()> {
    let roles = console.roles().await?;

    match args.format {
        OutputFormat::Json => print_json(&roles),
        OutputFormat::Text => {
            if roles.is_empty() {
                println!("No roles");
            }
            for role in &roles {
                println!("{:>4}  {}", role.id.get(), role.name);
            }
            Ok(())
        }
    }
}

async fn show(console: &AdminConsole, args: &RoleShowArgs) -> BinResult<()> {
    let matrix = console.role_matrix(RoleId::new(args.role_id)).await?;

    match args.format {
        OutputFormat::Json => print_json(&matrix),
        OutputFormat::Text => {
            println!("Role {} ({})", matrix.role_name, matrix.role_id);
            println!("{} of {} permissions granted", matrix.granted_count(), matrix.cells.len());
            println!();

            let mut current_module = None;
            for cell in &matrix.cells {
                if current_module != Some(cell.module_id) {
                    println!("{} (#{})", cell.module_name, cell.module_id);
                    current_module = Some(cell.module_id);
                }
                let mark = if cell.granted { "x" } else { " " };
                println!("  [{}] {:>4}  {}", mark, cell.action_id.get(), cell.action_name);
            }
            Ok(())
        }
    }
}

async fn toggle(console: &AdminConsole, args: &RoleToggleArgs) -> BinResult<()> {
    let change = console
        .toggle_permission(
            RoleId::new(args.role_id),
            ModuleId::new(args.module_id),
            ActionId::new(args.action_id),
        )
        .await?;

    match change {
        PermissionChange::Assign(request) => println!(
            "Granted action {} on {} to role {}",
            request.action_id, request.module_name, request.role_id
        ),
        PermissionChange::Remove(request) => println!(
            "Revoked action {} on module {} from role {}",
            request.action_id, request.module_id, request.role_id
        ),
    }
    Ok(())
}

async fn create(console: &AdminConsole, args: &RoleCreateArgs) -> BinResult<()> {
    let name = role_name(&args.name)?;
    let role = console.create_role(name).await?;

    match args.format {
        OutputFormat::Json => print_json(&role),
        OutputFormat::Text => {
            println!("Created role {} ({})", role.name, role.id);
            Ok(())
        }
    }
}

async fn assign_user(console: &AdminConsole, args: &UserRoleArgs) -> BinResult<()> {
    let user_id = user_id(&args.user_id)?;
    let role_id = RoleId::new(args.role_id);
    console.assign_role_to_user(user_id, role_id).await?;
    println!("Assigned role {} to user {}", role_id, user_id);
    Ok(())
}

async fn remove_user(console: &AdminConsole, args: &UserRoleArgs) -> BinResult<()> {
    let user_id = user_id(&args.user_id)?;
    let role_id = RoleId::new(args.role_id);
    console.remove_role_from_user(user_id, role_id).await?;
    println!("Removed role {} from user {}", role_id, user_id);
    Ok(())
}

fn role_name(name: &str) -> BinResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BinError::input("Role name cannot be empty"));
    }
    Ok(name)
}

fn user_id(user_id: &str) -> BinResult<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(BinError::input("User id cannot be empty"));
    }
    Ok(user_id)
}
