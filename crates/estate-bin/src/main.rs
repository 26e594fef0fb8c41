// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Estate console entry point.

use estate_bin::commands;
use estate_bin::error::report_error_and_exit;
use estate_bin::{init_logging, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(e) => report_error_and_exit(e),
    };

    init_logging(
        cli.effective_log_level(&config.logging),
        cli.effective_log_format(&config.logging),
    );

    if let Err(e) = commands::execute(&cli, config).await {
        report_error_and_exit(e);
    }
}
