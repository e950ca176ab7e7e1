use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::{
    cli::args::STDOUT_PATH,
    configs::Config,
    output::{OutputFormat, render},
    resolver::{ModuleConfig, Resolver},
};

/// Resolves `input` against the module roots of `config`.
pub fn resolve_input(config: &Config, input: &Path) -> Result<ModuleConfig> {
    let layout = config.layout();
    let resolver = Resolver::new(&layout).with_max_nesting_depth(config.max_nesting_depth);

    resolver
        .resolve(input)
        .with_context(|| format!("Failed to resolve {}", input.display()))
}

/// Resolves `input` and writes it to `out` in the requested format.
///
/// Nothing is written when resolution fails.
pub fn resolve_cli(config: &Config, input: &Path, out: &Path, format: OutputFormat) -> Result<()> {
    let resolved = resolve_input(config, input)?;

    let payload = render(&resolved, format).context("Failed to render resolved config")?;
    write_output(out, &payload)?;

    info!(
        tests = resolved.resolved_tests.len(),
        out = %out.display(),
        "resolved config written"
    );

    Ok(())
}

fn write_output(out: &Path, payload: &str) -> Result<()> {
    if out == Path::new(STDOUT_PATH) {
        println!("{payload}");
        return Ok(());
    }

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    fs::write(out, payload).with_context(|| format!("Failed to write {}", out.display()))
}
