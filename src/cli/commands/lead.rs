//! `nexa lead` command - Lead management

use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow, Tone};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::brand::Brand;
use crate::core::entity::Priority;
use crate::core::identity::EntityKind;
use crate::core::money::{Currency, Money};
use crate::core::repository::Repository;
use crate::entities::lead::{Lead, LeadDraft, LeadPatch, LeadStatus};

#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// List leads with filtering
    List(ListArgs),

    /// Create a new lead
    New(NewArgs),

    /// Show a lead's details
    Show(ShowArgs),

    /// Update fields on a lead
    Update(UpdateArgs),

    /// Delete a lead
    Delete(DeleteArgs),
}

/// Sort key for lead listings
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum SortKey {
    #[default]
    Created,
    Name,
    Value,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's')]
    pub status: Option<LeadStatus>,

    /// Filter by priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Filter by brand
    #[arg(long, short = 'b')]
    pub brand: Option<Brand>,

    /// Filter by assignee (exact match)
    #[arg(long, short = 'a')]
    pub assigned: Option<String>,

    /// Search in name, email and phone (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by field
    #[arg(long, default_value = "created")]
    pub sort: SortKey,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Brand (real-estate/business-setup)
    #[arg(long, short = 'b', default_value = "real-estate")]
    pub brand: Brand,

    /// Pipeline status
    #[arg(long, short = 's', default_value = "new")]
    pub status: LeadStatus,

    /// Priority (low/medium/high/critical)
    #[arg(long, short = 'p', default_value = "medium")]
    pub priority: Priority,

    /// Estimated value amount
    #[arg(long, default_value_t = 0)]
    pub value: i64,

    /// Currency code for the value
    #[arg(long, default_value = "AED")]
    pub currency: Currency,

    /// Agent or consultant responsible
    #[arg(long, default_value = "")]
    pub assigned_to: String,

    /// Property or area of interest (real-estate leads)
    #[arg(long)]
    pub interest: Option<String>,

    /// Company being set up (business-setup leads)
    #[arg(long)]
    pub company: Option<String>,

    /// Lead source
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Lead id (e.g. L003, or just 3)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Lead id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, short = 'b')]
    pub brand: Option<Brand>,

    #[arg(long, short = 's')]
    pub status: Option<LeadStatus>,

    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// New value amount (keeps the existing currency)
    #[arg(long)]
    pub value: Option<i64>,

    #[arg(long)]
    pub assigned_to: Option<String>,

    #[arg(long)]
    pub interest: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub source: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Lead id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("brand", "BRAND", 16),
    ColumnDef::new("status", "STATUS", 13),
    ColumnDef::new("priority", "PRIORITY", 10),
    ColumnDef::new("value", "VALUE", 16),
    ColumnDef::new("assigned", "ASSIGNED", 18),
    ColumnDef::new("created", "CREATED", 10),
];

fn status_tone(status: LeadStatus) -> Tone {
    match status {
        LeadStatus::New => Tone::Accent,
        LeadStatus::Contacted => Tone::Plain,
        LeadStatus::Qualified => Tone::Good,
        LeadStatus::Negotiation => Tone::Warn,
        LeadStatus::Won => Tone::Good,
        LeadStatus::Lost => Tone::Dim,
    }
}

pub fn run(cmd: LeadCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LeadCommands::List(args) => run_list(args, global),
        LeadCommands::New(args) => run_new(args, global),
        LeadCommands::Show(args) => run_show(args, global),
        LeadCommands::Update(args) => run_update(args, global),
        LeadCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut leads: Vec<&Lead> = store
        .all::<Lead>()
        .iter()
        .filter(|l| args.status.map_or(true, |s| l.status == s))
        .filter(|l| args.priority.map_or(true, |p| l.priority == p))
        .filter(|l| args.brand.map_or(true, |b| l.brand == b))
        .filter(|l| {
            args.assigned
                .as_deref()
                .map_or(true, |a| l.assigned_to == a)
        })
        .filter(|l| {
            args.search.as_deref().map_or(true, |q| {
                let q = q.to_lowercase();
                l.name.to_lowercase().contains(&q)
                    || l.email.to_lowercase().contains(&q)
                    || l.phone.to_lowercase().contains(&q)
            })
        })
        .collect();

    match args.sort {
        SortKey::Created => leads.sort_by_key(|l| l.created),
        SortKey::Name => leads.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Value => leads.sort_by_key(|l| l.value.amount),
    }
    if args.reverse {
        leads.reverse();
    }
    if let Some(limit) = args.limit {
        leads.truncate(limit);
    }

    if args.count {
        println!("{}", leads.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&leads).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&leads).into_diagnostic()?);
        }
        format => {
            let rows = leads.iter().map(|l| {
                TableRow::new(l.id.to_string())
                    .cell("name", CellValue::Text(l.name.clone()))
                    .cell("brand", CellValue::Text(l.brand.to_string()))
                    .cell(
                        "status",
                        CellValue::Badge(l.status.to_string(), status_tone(l.status)),
                    )
                    .cell("priority", CellValue::Priority(l.priority))
                    .cell("value", CellValue::Money(l.value))
                    .cell("assigned", CellValue::Text(l.assigned_to.clone()))
                    .cell("created", CellValue::Date(l.created))
            });

            let formatter = TableFormatter::new(COLUMNS, "lead");
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

    let id = store.add::<Lead>(LeadDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        brand: args.brand,
        status: args.status,
        priority: args.priority,
        value: Money::new(args.value, args.currency),
        assigned_to: args.assigned_to,
        interest: args.interest,
        company: args.company,
        source: args.source,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(lead) = store.get::<Lead>(&id) {
        println!(
            "{} Created lead {} ({})",
            style("✓").green(),
            style(&id).cyan(),
            lead.name
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Lead, &args.id)?;

    let lead = store
        .get::<Lead>(&id)
        .ok_or_else(|| miette::miette!("no lead with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(lead).into_diagnostic()?);
        }
        _ => print!("{}", serde_yml::to_string(lead).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Lead, &args.id)?;

    let value = args.value.map(|amount| {
        let currency = store
            .get::<Lead>(&id)
            .map(|l| l.value.currency)
            .unwrap_or_default();
        Money::new(amount, currency)
    });

    let patch = LeadPatch {
        name: args.name,
        email: args.email,
        phone: args.phone,
        brand: args.brand,
        status: args.status,
        priority: args.priority,
        value,
        assigned_to: args.assigned_to,
        interest: args.interest,
        company: args.company,
        source: args.source,
    };

    if !store.update::<Lead>(&id, patch) {
        return Err(miette::miette!("no lead with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Updated lead {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Lead, &args.id)?;

    let name = store
        .get::<Lead>(&id)
        .ok_or_else(|| miette::miette!("no lead with id {}", id))?
        .name
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete lead {} ({})?", id, name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Lead>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Deleted lead {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
