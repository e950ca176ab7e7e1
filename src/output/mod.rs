mod json;
mod summary;

use clap::ValueEnum;

use crate::{resolver::ModuleConfig, tree::render_tests};

pub use json::{JsonInstructionNode, JsonNodeAttr, JsonTestConfig, JsonTestNode, render_json};
pub use summary::render_summary;

/// Output encodings for a resolved config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<tests>` document with every reference expanded
    #[default]
    Xml,
    /// JSON projection of tests and their instructions
    Json,
    /// Plain-text outline for inspection
    Summary,
}

pub fn render(config: &ModuleConfig, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Xml => Ok(render_tests(&config.resolved_tests)),
        OutputFormat::Json => render_json(config),
        OutputFormat::Summary => Ok(render_summary(config)),
    }
}
