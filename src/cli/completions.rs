use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::Args;

/// Writes the completion script for `shell` to `out`.
///
/// ```bash
/// xmltest completions zsh > ~/.zfunc/_xmltest
/// xmltest completions bash > ~/.local/share/bash-completion/completions/xmltest
/// ```
pub fn generate_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Args::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
