//! `nexa task` command - Task management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id, parse_time};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow, Tone};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Priority;
use crate::core::identity::EntityKind;
use crate::core::repository::Repository;
use crate::entities::task::{Task, TaskDraft, TaskPatch, TaskStatus};

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with filtering
    List(ListArgs),

    /// Create a new task
    New(NewArgs),

    /// Show a task's details
    Show(ShowArgs),

    /// Update fields on a task
    Update(UpdateArgs),

    /// Mark a task completed
    Done(DoneArgs),

    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<TaskStatus>,

    /// Filter by priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Filter by assignee (exact match)
    #[arg(long, short = 'a')]
    pub assigned: Option<String>,

    /// Only tasks due on or before this date
    #[arg(long)]
    pub due_before: Option<NaiveDate>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Task title
    #[arg(long)]
    pub title: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: NaiveDate,

    /// Due time (HH:MM)
    #[arg(long)]
    pub due_time: Option<String>,

    /// Priority
    #[arg(long, short = 'p', default_value = "medium")]
    pub priority: Priority,

    /// Person responsible
    #[arg(long, default_value = "")]
    pub assigned_to: String,

    /// Related record reference (e.g. L003)
    #[arg(long)]
    pub related_to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Task id (e.g. T004, or just 4)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub due_date: Option<NaiveDate>,

    #[arg(long)]
    pub due_time: Option<String>,

    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    #[arg(long, short = 's')]
    pub status: Option<TaskStatus>,

    #[arg(long)]
    pub assigned_to: Option<String>,

    #[arg(long)]
    pub related_to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DoneArgs {
    /// Task id
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Task id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("title", "TITLE", 30),
    ColumnDef::new("due", "DUE", 10),
    ColumnDef::new("time", "TIME", 6),
    ColumnDef::new("priority", "PRIORITY", 10),
    ColumnDef::new("status", "STATUS", 11),
    ColumnDef::new("assigned", "ASSIGNED", 18),
];

pub fn run(cmd: TaskCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaskCommands::List(args) => run_list(args, global),
        TaskCommands::New(args) => run_new(args, global),
        TaskCommands::Show(args) => run_show(args, global),
        TaskCommands::Update(args) => run_update(args, global),
        TaskCommands::Done(args) => run_done(args, global),
        TaskCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut tasks: Vec<&Task> = store
        .all::<Task>()
        .iter()
        .filter(|t| args.status.map_or(true, |s| t.status == s))
        .filter(|t| args.priority.map_or(true, |p| t.priority == p))
        .filter(|t| {
            args.assigned
                .as_deref()
                .map_or(true, |a| t.assigned_to == a)
        })
        .filter(|t| args.due_before.map_or(true, |d| t.due_date <= d))
        .collect();

    tasks.sort_by_key(|t| (t.due_date, t.due_time));

    if let Some(limit) = args.limit {
        tasks.truncate(limit);
    }

    if args.count {
        println!("{}", tasks.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&tasks).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&tasks).into_diagnostic()?);
        }
        format => {
            let rows = tasks.iter().map(|t| {
                let tone = match t.status {
                    TaskStatus::Pending => Tone::Warn,
                    TaskStatus::Completed => Tone::Good,
                };
                TableRow::new(t.id.to_string())
                    .cell("title", CellValue::Text(t.title.clone()))
                    .cell("due", CellValue::Date(t.due_date))
                    .cell("time", CellValue::Time(t.due_time))
                    .cell("priority", CellValue::Priority(t.priority))
                    .cell("status", CellValue::Badge(t.status.to_string(), tone))
                    .cell("assigned", CellValue::Text(t.assigned_to.clone()))
            });

            let formatter = TableFormatter::new(COLUMNS, "task");
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

    let due_time = args.due_time.as_deref().map(parse_time).transpose()?;

    let id = store.add::<Task>(TaskDraft {
        title: args.title,
        due_date: args.due_date,
        due_time,
        priority: args.priority,
        status: TaskStatus::Pending,
        assigned_to: args.assigned_to,
        related_to: args.related_to,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(task) = store.get::<Task>(&id) {
        println!(
            "{} Created task {} ({})",
            style("✓").green(),
            style(&id).cyan(),
            task.title
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Task, &args.id)?;

    let task = store
        .get::<Task>(&id)
        .ok_or_else(|| miette::miette!("no task with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(task).into_diagnostic()?);
        }
        _ => print!("{}", serde_yml::to_string(task).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Task, &args.id)?;

    let due_time = args.due_time.as_deref().map(parse_time).transpose()?;

    let patch = TaskPatch {
        title: args.title,
        due_date: args.due_date,
        due_time,
        priority: args.priority,
        status: args.status,
        assigned_to: args.assigned_to,
        related_to: args.related_to,
    };

    if !store.update::<Task>(&id, patch) {
        return Err(miette::miette!("no task with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Updated task {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_done(args: DoneArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Task, &args.id)?;

    let updated = store.update::<Task>(
        &id,
        TaskPatch {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        },
    );
    if !updated {
        return Err(miette::miette!("no task with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Completed task {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Task, &args.id)?;

    let title = store
        .get::<Task>(&id)
        .ok_or_else(|| miette::miette!("no task with id {}", id))?
        .title
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete task {} ({})?", id, title))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Task>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Deleted task {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
