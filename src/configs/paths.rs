use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;

const XMLTEST_CONFIG_NAME: &str = "config.toml";
const XMLTEST_APP_NAME: &str = "xmltest";
const LOCAL_CONFIG_DIR_NAME: &str = "configs";

/// Expands a path with tilde (~) and environment variable substitution
///
/// - `~` → user's home directory
/// - `~/path` → path relative to home directory
/// - `$VAR/path` → expands environment variable VAR
/// - `${VAR}/path` → expands environment variable VAR (brace syntax)
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use xmltest::configs::expand_path;
///
/// # fn main() -> anyhow::Result<()> {
/// let expanded = expand_path(PathBuf::from("~/appData"))?;
/// // Returns: /Users/username/appData
/// # Ok(())
/// # }
/// ```
pub fn expand_path(path: PathBuf) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .context("Path contains invalid UTF-8 characters")?;

    let expanded = shellexpand::full(path_str).context("Failed to expand path")?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Returns the default config directory based on platform conventions
///
/// Checks `$XDG_CONFIG_HOME` first and falls back to `~/.config/xmltest` when
/// it is unset, empty, or relative (XDG requires an absolute path).
pub fn get_default_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        let path = PathBuf::from(&xdg_config);
        if path.is_absolute() {
            return Ok(path.join(XMLTEST_APP_NAME));
        }
    }

    dirs::home_dir()
        .map(|dir| dir.join(".config").join(XMLTEST_APP_NAME))
        .context("Failed to determine home directory")
}

/// Finds the config file using the following search order:
///
/// 1. CLI argument path (if provided) - returns error if specified but doesn't exist
/// 2. XDG config directory: `~/.config/xmltest/config.toml`
/// 3. Working directory: `./configs/config.toml`
///
/// Returns `Ok(None)` when nothing is found via auto-discovery; defaults apply then.
pub fn find_config_file(cli_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        if path.exists() {
            return Ok(Some(path));
        } else {
            return Err(anyhow!("Specified config file does not exist: {:?}", path));
        }
    }

    let xdg_config_path = get_default_config_dir()?.join(XMLTEST_CONFIG_NAME);
    if xdg_config_path.exists() {
        return Ok(Some(xdg_config_path));
    }

    let local_config_path = PathBuf::from(".")
        .join(LOCAL_CONFIG_DIR_NAME)
        .join(XMLTEST_CONFIG_NAME);
    if local_config_path.exists() {
        return Ok(Some(local_config_path));
    }

    Ok(None)
}
