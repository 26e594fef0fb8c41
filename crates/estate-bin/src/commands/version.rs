// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("Estate console");
    println!();
    println!("Version Information:");
    println!("  estate-bin:    {}", env!("CARGO_PKG_VERSION"));
    println!("  estate-core:   {}", estate_core::VERSION);
    println!("  estate-auth:   {}", estate_auth::VERSION);
    println!("  estate-config: {}", estate_config::VERSION);
    println!("  estate-client: {}", estate_client::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:        {}", std::env::consts::ARCH);
    println!("  OS:            {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
