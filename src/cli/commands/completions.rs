//! `nexa completions` command - Shell completion generation

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use miette::Result;

use crate::cli::Cli;

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "nexa", &mut std::io::stdout());
    Ok(())
}
