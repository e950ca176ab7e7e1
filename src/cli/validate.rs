use anyhow::{Context, Result, ensure};
use std::path::PathBuf;

use crate::{
    cli::resolve::resolve_input,
    configs::{Config, expand_path, load_config, validate_config},
};

/// Validates a config file at the specified path
///
/// Performs TOML syntax checking, structure parsing and value validation,
/// then checks that the configured data directory exists.
pub fn validate_config_cli(config_path: PathBuf) -> Result<Config> {
    let config_path = expand_path(config_path).context("Failed to expand config path")?;

    ensure!(
        config_path.exists(),
        "Config file not found: {}",
        config_path.display()
    );

    ensure!(
        config_path.is_file(),
        "Path must be a file, not a directory: {}",
        config_path.display()
    );

    let mut config = load_config(config_path).context("Failed to load config")?;
    config.app_data = expand_path(config.app_data).context("Failed to expand app_data path")?;

    validate_config(&config)?;
    validate_app_data(&config)?;

    println!("✓ Config file is valid");

    Ok(config)
}

/// Resolves a test config without writing anything and reports what it produced.
pub fn validate_input_cli(config: &Config, input: PathBuf) -> Result<()> {
    let input = expand_path(input).context("Failed to expand input path")?;

    ensure!(input.exists(), "Test config not found: {}", input.display());

    let resolved = resolve_input(config, &input)?;

    println!(
        "✓ {} resolves to {} test(s) from {} declaration(s)",
        input.display(),
        resolved.resolved_tests.len(),
        resolved.declarations.len()
    );

    Ok(())
}

pub fn validate_app_data(config: &Config) -> Result<()> {
    ensure!(
        config.app_data.is_dir(),
        "app_data directory not found: {}",
        config.app_data.display()
    );
    Ok(())
}
