mod config;
pub mod paths;

pub use config::{Config, load_config, validate_config};
pub use paths::{expand_path, find_config_file, get_default_config_dir};
