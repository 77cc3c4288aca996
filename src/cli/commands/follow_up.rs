//! `nexa followup` command - Follow-up management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow, Tone};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Priority;
use crate::core::identity::EntityKind;
use crate::core::repository::Repository;
use crate::entities::follow_up::{
    FollowUp, FollowUpDraft, FollowUpKind, FollowUpPatch, FollowUpStatus,
};

#[derive(Subcommand, Debug)]
pub enum FollowUpCommands {
    /// List follow-ups with filtering
    List(ListArgs),

    /// Schedule a new follow-up
    New(NewArgs),

    /// Show a follow-up's details
    Show(ShowArgs),

    /// Update fields on a follow-up
    Update(UpdateArgs),

    /// Mark a follow-up done
    Done(DoneArgs),

    /// Delete a follow-up
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<FollowUpStatus>,

    /// Filter by contact type
    #[arg(long, short = 't')]
    pub r#type: Option<FollowUpKind>,

    /// Filter by assignee (exact match)
    #[arg(long, short = 'a')]
    pub assigned: Option<String>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Lead being followed up
    #[arg(long)]
    pub lead: String,

    /// Contact type (call/email/whatsapp/meeting)
    #[arg(long, short = 't', default_value = "call")]
    pub r#type: FollowUpKind,

    /// Follow-up date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Person responsible
    #[arg(long, default_value = "")]
    pub assigned_to: String,

    /// Priority
    #[arg(long, short = 'p', default_value = "medium")]
    pub priority: Priority,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Follow-up id (e.g. F001, or just 1)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Follow-up id
    pub id: String,

    #[arg(long)]
    pub lead: Option<String>,

    #[arg(long, short = 't')]
    pub r#type: Option<FollowUpKind>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, short = 's')]
    pub status: Option<FollowUpStatus>,

    #[arg(long)]
    pub assigned_to: Option<String>,

    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,
}

#[derive(clap::Args, Debug)]
pub struct DoneArgs {
    /// Follow-up id
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Follow-up id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("lead", "LEAD", 22),
    ColumnDef::new("type", "TYPE", 10),
    ColumnDef::new("date", "DATE", 10),
    ColumnDef::new("priority", "PRIORITY", 10),
    ColumnDef::new("status", "STATUS", 9),
    ColumnDef::new("assigned", "ASSIGNED", 18),
];

pub fn run(cmd: FollowUpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FollowUpCommands::List(args) => run_list(args, global),
        FollowUpCommands::New(args) => run_new(args, global),
        FollowUpCommands::Show(args) => run_show(args, global),
        FollowUpCommands::Update(args) => run_update(args, global),
        FollowUpCommands::Done(args) => run_done(args, global),
        FollowUpCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut follow_ups: Vec<&FollowUp> = store
        .all::<FollowUp>()
        .iter()
        .filter(|f| args.status.map_or(true, |s| f.status == s))
        .filter(|f| args.r#type.map_or(true, |t| f.kind == t))
        .filter(|f| {
            args.assigned
                .as_deref()
                .map_or(true, |a| f.assigned_to == a)
        })
        .collect();

    follow_ups.sort_by_key(|f| f.date);

    if let Some(limit) = args.limit {
        follow_ups.truncate(limit);
    }

    if args.count {
        println!("{}", follow_ups.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&follow_ups).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&follow_ups).into_diagnostic()?);
        }
        format => {
            let rows = follow_ups.iter().map(|f| {
                let tone = match f.status {
                    FollowUpStatus::Pending => Tone::Warn,
                    FollowUpStatus::Done => Tone::Good,
                };
                TableRow::new(f.id.to_string())
                    .cell("lead", CellValue::Text(f.lead.clone()))
                    .cell("type", CellValue::Text(f.kind.to_string()))
                    .cell("date", CellValue::Date(f.date))
                    .cell("priority", CellValue::Priority(f.priority))
                    .cell("status", CellValue::Badge(f.status.to_string(), tone))
                    .cell("assigned", CellValue::Text(f.assigned_to.clone()))
            });

            let formatter = TableFormatter::new(COLUMNS, "follow-up");
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

    let id = store.add::<FollowUp>(FollowUpDraft {
        lead: args.lead,
        kind: args.r#type,
        date: args.date,
        notes: args.notes,
        status: FollowUpStatus::Pending,
        assigned_to: args.assigned_to,
        priority: args.priority,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(follow_up) = store.get::<FollowUp>(&id) {
        println!(
            "{} Created follow-up {} ({} with {})",
            style("✓").green(),
            style(&id).cyan(),
            follow_up.kind,
            follow_up.lead
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::FollowUp, &args.id)?;

    let follow_up = store
        .get::<FollowUp>(&id)
        .ok_or_else(|| miette::miette!("no follow-up with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(follow_up).into_diagnostic()?
            );
        }
        _ => print!("{}", serde_yml::to_string(follow_up).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::FollowUp, &args.id)?;

    let patch = FollowUpPatch {
        lead: args.lead,
        kind: args.r#type,
        date: args.date,
        notes: args.notes,
        status: args.status,
        assigned_to: args.assigned_to,
        priority: args.priority,
    };

    if !store.update::<FollowUp>(&id, patch) {
        return Err(miette::miette!("no follow-up with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Updated follow-up {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_done(args: DoneArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::FollowUp, &args.id)?;

    let updated = store.update::<FollowUp>(
        &id,
        FollowUpPatch {
            status: Some(FollowUpStatus::Done),
            ..Default::default()
        },
    );
    if !updated {
        return Err(miette::miette!("no follow-up with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Completed follow-up {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::FollowUp, &args.id)?;

    let lead = store
        .get::<FollowUp>(&id)
        .ok_or_else(|| miette::miette!("no follow-up with id {}", id))?
        .lead
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete follow-up {} ({})?", id, lead))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<FollowUp>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Deleted follow-up {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}
