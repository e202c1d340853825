use anyhow::Result;
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Generate shell completions on stdout.
///
/// # Errors
///
/// Infallible today; returns `Result` for uniformity with other commands.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(opts.shell, &mut cmd, "quartermaster", &mut std::io::stdout());
    Ok(())
}
