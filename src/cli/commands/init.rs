//! `nexa init` command - Workspace creation

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::repository::{Repository, YamlRepository};
use crate::core::seed;
use crate::core::store::CrmStore;
use crate::core::workspace::Workspace;
use crate::entities::Lead;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Start with empty collections instead of the sample data
    #[arg(long)]
    pub empty: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&path).into_diagnostic()?;

    let workspace = Workspace::init(&path).map_err(|e| miette::miette!("{}", e))?;

    let store = if args.empty {
        CrmStore::new()
    } else {
        seed::store().into_diagnostic()?
    };

    let lead_count = store.all::<Lead>().len();
    let root = workspace.root().to_path_buf();
    let mut repository = YamlRepository::new(workspace);
    repository.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Initialized Nexa workspace at {}",
            style("✓").green(),
            style(root.display()).cyan()
        );
        if args.empty {
            println!("  Collections start empty. Add a first lead with 'nexa lead new'.");
        } else {
            println!(
                "  Seeded sample data ({} leads). Try 'nexa status' or 'nexa lead list'.",
                lead_count
            );
        }
    }
    Ok(())
}
