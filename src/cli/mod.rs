mod args;
pub mod completions;
pub mod resolve;
pub mod validate;

pub use args::{Args, Commands, DEFAULT_INPUT, DEFAULT_OUTPUT, STDOUT_PATH};
pub use resolve::{resolve_cli, resolve_input};
