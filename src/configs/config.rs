use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolver::{DEFAULT_MAX_NESTING_DEPTH, ModuleLayout};
use anyhow::{Context, Result, ensure};

const COMMON_DIR_NAME: &str = "Common";
const CONFIGS_DIR_NAME: &str = "Configs";

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Data directory holding the `Common/` and `Configs/` module trees
    pub app_data: PathBuf,
    pub max_nesting_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_data: PathBuf::from("./appData"),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl Config {
    /// Module roots derived from `app_data`.
    pub fn layout(&self) -> ModuleLayout {
        ModuleLayout::new(
            self.app_data.join(COMMON_DIR_NAME),
            self.app_data.join(CONFIGS_DIR_NAME),
        )
    }
}

pub fn load_config(config_path: PathBuf) -> Result<Config> {
    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {:?}", config_path))?;

    let config: Config =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", config_path))?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    ensure!(
        !config.app_data.as_os_str().is_empty(),
        "app_data must not be empty"
    );

    ensure!(
        config.max_nesting_depth > 0,
        "max_nesting_depth must be greater than 0"
    );

    Ok(())
}
