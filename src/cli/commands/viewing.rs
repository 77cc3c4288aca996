//! `nexa viewing` command - Viewing schedule management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id, parse_time};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow, Tone};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityKind;
use crate::core::repository::Repository;
use crate::entities::viewing::{Viewing, ViewingDraft, ViewingPatch, ViewingStatus};

#[derive(Subcommand, Debug)]
pub enum ViewingCommands {
    /// List viewings with filtering
    List(ListArgs),

    /// Schedule a new viewing
    New(NewArgs),

    /// Show a viewing's details
    Show(ShowArgs),

    /// Update fields on a viewing
    Update(UpdateArgs),

    /// Delete a viewing
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<ViewingStatus>,

    /// Filter by agent (exact match)
    #[arg(long, short = 'a')]
    pub agent: Option<String>,

    /// Only viewings on this date
    #[arg(long)]
    pub on: Option<NaiveDate>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Property reference
    #[arg(long)]
    pub property: String,

    /// Client name
    #[arg(long)]
    pub client: String,

    /// Viewing date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Viewing time (HH:MM)
    #[arg(long)]
    pub time: String,

    /// Agent showing the property
    #[arg(long)]
    pub agent: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Viewing id (e.g. V002, or just 2)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Viewing id
    pub id: String,

    #[arg(long)]
    pub property: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub agent: Option<String>,

    #[arg(long, short = 's')]
    pub status: Option<ViewingStatus>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Viewing id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("property", "PROPERTY", 26),
    ColumnDef::new("client", "CLIENT", 20),
    ColumnDef::new("date", "DATE", 10),
    ColumnDef::new("time", "TIME", 6),
    ColumnDef::new("agent", "AGENT", 18),
    ColumnDef::new("status", "STATUS", 11),
];

fn status_tone(status: ViewingStatus) -> Tone {
    match status {
        ViewingStatus::Scheduled => Tone::Accent,
        ViewingStatus::Completed => Tone::Good,
        ViewingStatus::Cancelled => Tone::Dim,
        ViewingStatus::NoShow => Tone::Bad,
    }
}

pub fn run(cmd: ViewingCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ViewingCommands::List(args) => run_list(args, global),
        ViewingCommands::New(args) => run_new(args, global),
        ViewingCommands::Show(args) => run_show(args, global),
        ViewingCommands::Update(args) => run_update(args, global),
        ViewingCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut viewings: Vec<&Viewing> = store
        .all::<Viewing>()
        .iter()
        .filter(|v| args.status.map_or(true, |s| v.status == s))
        .filter(|v| args.agent.as_deref().map_or(true, |a| v.agent == a))
        .filter(|v| args.on.map_or(true, |d| v.date == d))
        .collect();

    viewings.sort_by_key(|v| (v.date, v.time));

    if let Some(limit) = args.limit {
        viewings.truncate(limit);
    }

    if args.count {
        println!("{}", viewings.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&viewings).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&viewings).into_diagnostic()?);
        }
        format => {
            let rows = viewings.iter().map(|v| {
                TableRow::new(v.id.to_string())
                    .cell("property", CellValue::Text(v.property.clone()))
                    .cell("client", CellValue::Text(v.client.clone()))
                    .cell("date", CellValue::Date(v.date))
                    .cell("time", CellValue::Time(Some(v.time)))
                    .cell("agent", CellValue::Text(v.agent.clone()))
                    .cell(
                        "status",
                        CellValue::Badge(v.status.to_string(), status_tone(v.status)),
                    )
            });

            let formatter = TableFormatter::new(COLUMNS, "viewing");
            let formatter = if global.quiet {
                formatter.without_summary()
            } else {
                formatter
            };
            formatter.output(rows, format);
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;

    let time = parse_time(&args.time)?;

    let id = store.add::<Viewing>(ViewingDraft {
        property: args.property,
        client: args.client,
        date: args.date,
        time,
        agent: args.agent,
        status: ViewingStatus::Scheduled,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(viewing) = store.get::<Viewing>(&id) {
        println!(
            "{} Scheduled viewing {} ({} on {})",
            style("✓").green(),
            style(&id).cyan(),
            viewing.property,
            viewing.date
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Viewing, &args.id)?;

    let viewing = store
        .get::<Viewing>(&id)
        .ok_or_else(|| miette::miette!("no viewing with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(viewing).into_diagnostic()?
            );
        }
        _ => print!("{}", serde_yml::to_string(viewing).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Viewing, &args.id)?;

    let time = args.time.as_deref().map(parse_time).transpose()?;

    let patch = ViewingPatch {
        property: args.property,
        client: args.client,
        date: args.date,
        time,
        agent: args.agent,
        status: args.status,
    };

    if !store.update::<Viewing>(&id, patch) {
        return Err(miette::miette!("no viewing with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Updated viewing {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Viewing, &args.id)?;

    let property = store
        .get::<Viewing>(&id)
        .ok_or_else(|| miette::miette!("no viewing with id {}", id))?
        .property
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete viewing {} ({})?", id, property))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Viewing>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Deleted viewing {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}
