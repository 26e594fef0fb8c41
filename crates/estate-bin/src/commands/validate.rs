// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use estate_config::{ConsoleConfig, SecretValue};

use super::print_json;
use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command.
///
/// The configuration was already loaded and validated; this reports it and
/// collects warnings.
pub fn validate(cli: &Cli, config: &ConsoleConfig, args: &ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;
    let file_exists = config_path.exists();

    if args.strict && !file_exists {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let mut warnings: Vec<String> = Vec::new();
    if !file_exists {
        warnings.push(format!(
            "{} does not exist; defaults are in effect",
            config_path.display()
        ));
    }
    if config.api.base_url.starts_with("http://") {
        warnings.push("api.base_url is not HTTPS; tokens are sent in clear text".to_string());
    }
    if config.api.tenant_id.is_none() {
        warnings.push("api.tenant_id is not set; login needs --tenant".to_string());
    }
    if config.session.verification.is_none() {
        warnings.push("session.verification is not set; token signatures are not checked".to_string());
    }

    let shown = args.show_config.then(|| redacted(config));

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Backend:     {}", config.api.base_url);
            println!("  Timeout:     {}s", config.api.timeout_secs);
            println!("  Tenant:      {}", config.api.tenant_id.as_deref().unwrap_or("(none)"));
            println!("  State dir:   {}", config.session.state_dir.display());
            println!("  Token key:   {}", config.session.token_key);
            println!(
                "  Verify:      {}",
                if config.session.verification.is_some() { "enabled" } else { "disabled" }
            );
            println!("  Catalog TTL: {}s", config.cache.module_catalog_ttl_secs);

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if let Some(shown) = &shown {
                println!();
                println!("Parsed configuration:");
                println!("{}", serde_json::to_string_pretty(shown)?);
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "valid": true,
            "config_path": config_path.display().to_string(),
            "file_exists": file_exists,
            "warnings": warnings,
            "config": shown,
        })),
    }
}

/// Copy of the configuration with secrets masked.
fn redacted(config: &ConsoleConfig) -> ConsoleConfig {
    let mut config = config.clone();
    if let Some(verification) = config.session.verification.as_mut() {
        verification.secret = SecretValue::new("***");
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_config::VerificationConfig;

    #[test]
    fn test_redacted_masks_secret() {
        let mut config = ConsoleConfig::default();
        config.session.verification = Some(VerificationConfig {
            secret: SecretValue::new("hunter2"),
            algorithm: Default::default(),
            validate_exp: false,
        });

        let json = serde_json::to_string(&redacted(&config)).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("***"));
    }
}
