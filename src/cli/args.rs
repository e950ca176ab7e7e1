use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::output::OutputFormat;

pub const DEFAULT_INPUT: &str = "appData/Configs/full.xml";
pub const DEFAULT_OUTPUT: &str = "out/config.xml";
/// Output path that writes to stdout instead of a file
pub const STDOUT_PATH: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "xmltest")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the parser config.toml file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root test config to resolve
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the resolved config ("-" for stdout)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Encoding of the resolved config
    #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Validate the configuration file, and optionally check that a test config resolves
    Validate {
        /// Test config to resolve without writing any output
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
}
