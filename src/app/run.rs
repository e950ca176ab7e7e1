use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, debug};

use crate::{
    Config,
    cli::{
        Args, Commands, resolve_cli,
        completions::generate_completions,
        validate::{validate_app_data, validate_config_cli, validate_input_cli},
    },
    configs::{expand_path, find_config_file, get_default_config_dir, load_config, validate_config},
};

/// Main entry point for the xmltest binary.
///
/// 1. **Parse CLI arguments** and install the log subscriber
/// 2. **Handle subcommands** (`completions`, `validate`), which exit early
/// 3. **Resolve** the input test config and write the expanded result
///
/// # Errors
///
/// Returns the first failure of any stage: unreadable or invalid config,
/// a module that cannot be read or parsed, an unresolvable or recursive
/// test reference, or an output file that cannot be written. Nothing is
/// written to the output path when resolution fails.
pub fn run() -> Result<()> {
    let cli_args = Args::parse();

    init_logging(cli_args.verbose);

    if handle_cli_commands(&cli_args)? {
        return Ok(());
    }

    let config = handle_config(&cli_args)?;

    let input = expand_path(cli_args.input.clone()).context("Failed to expand input path")?;
    let out = expand_path(cli_args.out.clone()).context("Failed to expand output path")?;

    resolve_cli(&config, &input, &out, cli_args.format)
}

// Installs a stderr fmt subscriber; -v raises the level from warn to info, debug, then trace.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // A subscriber may already be installed when embedded; keep the existing one then
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// Loads the config file found via CLI path, XDG config dir or ./configs,
// falling back to defaults, expands app_data and validates the result.
fn handle_config(cli_args: &Args) -> Result<Config> {
    let expanded_config = cli_args
        .config
        .clone()
        .map(expand_path)
        .transpose()
        .context("Failed to expand config path")?;

    let config_path_opt =
        find_config_file(expanded_config).context("Failed to find config file")?;

    let mut config = match config_path_opt {
        Some(path) => {
            debug!(config = %path.display(), "loading config");
            load_config(path).context("Failed to load config file")?
        }
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    config.app_data = expand_path(config.app_data).context("Failed to expand app_data path")?;

    validate_config(&config)?;

    Ok(config)
}

// Handles subcommands that exit without resolving the main input.
// Returns Ok(true) if a subcommand was handled and the app should exit
fn handle_cli_commands(cli_args: &Args) -> Result<bool> {
    let Some(command) = &cli_args.command else {
        return Ok(false);
    };
    match command {
        Commands::Completions { shell } => {
            generate_completions(*shell, &mut std::io::stdout());
            Ok(true)
        }
        Commands::Validate { input } => {
            let expanded_config = cli_args
                .config
                .clone()
                .map(expand_path)
                .transpose()
                .context("Failed to expand config path")?;

            let config = match find_config_file(expanded_config)? {
                Some(path) => validate_config_cli(path)?,
                None if input.is_some() => {
                    let config = Config::default();
                    validate_app_data(&config)?;
                    config
                }
                None => {
                    let xdg_path = get_default_config_dir()?.join("config.toml");
                    bail!(
                        "No config file found to validate. Searched:\n  - {:?}\n  - ./configs/config.toml",
                        xdg_path
                    );
                }
            };

            if let Some(input) = input {
                validate_input_cli(&config, input.clone())?;
            }
            Ok(true)
        }
    }
}
