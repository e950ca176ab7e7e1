pub mod app;
pub mod cli;
pub mod configs;
pub mod error;
pub mod output;
pub mod resolver;
pub mod tree;

pub use configs::Config;
pub use error::{ResolveError, ResolveResult};
pub use resolver::{ModuleConfig, ModuleLayout, ModuleLoader, Resolver};
pub use tree::Node;

pub use configs::{find_config_file, load_config, validate_config};
