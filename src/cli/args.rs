//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    config::ConfigCommands,
    deal::DealCommands,
    follow_up::FollowUpCommands,
    init::InitArgs,
    lead::LeadCommands,
    pledge::PledgeCommands,
    property::PropertyCommands,
    status::StatusArgs,
    task::TaskCommands,
    viewing::ViewingCommands,
};

#[derive(Parser)]
#[command(name = "nexa")]
#[command(author, version, about = "Nexa CRM")]
#[command(
    long_about = "A dual-brand CRM for real-estate and business-setup pipelines, kept as plain text YAML files."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Workspace root (default: auto-detect by finding .nexa/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new Nexa workspace
    Init(InitArgs),

    /// Lead management
    #[command(subcommand)]
    Lead(LeadCommands),

    /// Property listing management
    #[command(subcommand)]
    Property(PropertyCommands),

    /// Deal pipeline management
    #[command(subcommand)]
    Deal(DealCommands),

    /// Pledge (payment commitment) management
    #[command(subcommand)]
    Pledge(PledgeCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Viewing schedule management
    #[command(subcommand)]
    Viewing(ViewingCommands),

    /// Follow-up management
    #[command(subcommand, name = "followup")]
    FollowUp(FollowUpCommands),

    /// Show the workspace dashboard
    Status(StatusArgs),

    /// Get and set user settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
