//! `nexa deal` command - Deal pipeline management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow, Tone};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityKind;
use crate::core::money::{Currency, Money};
use crate::core::repository::Repository;
use crate::entities::deal::{Deal, DealDraft, DealPatch, DealStage};

#[derive(Subcommand, Debug)]
pub enum DealCommands {
    /// List deals with filtering
    List(ListArgs),

    /// Create a new deal
    New(NewArgs),

    /// Show a deal's details
    Show(ShowArgs),

    /// Update fields on a deal
    Update(UpdateArgs),

    /// Delete a deal
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by pipeline stage
    #[arg(long, short = 's')]
    pub stage: Option<DealStage>,

    /// Only open deals (not won or lost)
    #[arg(long, conflicts_with = "stage")]
    pub open: bool,

    /// Search in title, client and property
    #[arg(long)]
    pub search: Option<String>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Deal title
    #[arg(long)]
    pub title: String,

    /// Client name
    #[arg(long)]
    pub client: String,

    /// Property reference
    #[arg(long)]
    pub property: String,

    /// Deal value amount
    #[arg(long)]
    pub value: i64,

    /// Currency code for the value
    #[arg(long, default_value = "AED")]
    pub currency: Currency,

    /// Pipeline stage
    #[arg(long, short = 's', default_value = "inquiry")]
    pub stage: DealStage,

    /// Win probability 0-100
    #[arg(long, short = 'p', default_value_t = 50)]
    pub probability: u8,

    /// Expected close date (YYYY-MM-DD)
    #[arg(long)]
    pub expected_close: NaiveDate,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Deal id (e.g. D001, or just 1)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Deal id
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub property: Option<String>,

    /// New value amount (keeps the existing currency)
    #[arg(long)]
    pub value: Option<i64>,

    #[arg(long, short = 's')]
    pub stage: Option<DealStage>,

    #[arg(long, short = 'p')]
    pub probability: Option<u8>,

    #[arg(long)]
    pub expected_close: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Deal id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("title", "TITLE", 26),
    ColumnDef::new("client", "CLIENT", 20),
    ColumnDef::new("value", "VALUE", 16),
    ColumnDef::new("stage", "STAGE", 13),
    ColumnDef::new("prob", "PROB", 6),
    ColumnDef::new("close", "CLOSE", 10),
];

fn stage_tone(stage: DealStage) -> Tone {
    match stage {
        DealStage::Inquiry => Tone::Plain,
        DealStage::Viewing => Tone::Accent,
        DealStage::Offer => Tone::Accent,
        DealStage::Negotiation => Tone::Warn,
        DealStage::Won => Tone::Good,
        DealStage::Lost => Tone::Dim,
    }
}

pub fn run(cmd: DealCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DealCommands::List(args) => run_list(args, global),
        DealCommands::New(args) => run_new(args, global),
        DealCommands::Show(args) => run_show(args, global),
        DealCommands::Update(args) => run_update(args, global),
        DealCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut deals: Vec<&Deal> = store
        .all::<Deal>()
        .iter()
        .filter(|d| args.stage.map_or(true, |s| d.stage == s))
        .filter(|d| !args.open || !d.stage.is_closed())
        .filter(|d| {
            args.search.as_deref().map_or(true, |q| {
                let q = q.to_lowercase();
                d.title.to_lowercase().contains(&q)
                    || d.client.to_lowercase().contains(&q)
                    || d.property.to_lowercase().contains(&q)
            })
        })
        .collect();

    if let Some(limit) = args.limit {
        deals.truncate(limit);
    }

    if args.count {
        println!("{}", deals.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&deals).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&deals).into_diagnostic()?);
        }
        format => {
            let rows = deals.iter().map(|d| {
                TableRow::new(d.id.to_string())
                    .cell("title", CellValue::Text(d.title.clone()))
                    .cell("client", CellValue::Text(d.client.clone()))
                    .cell("value", CellValue::Money(d.value))
                    .cell(
                        "stage",
                        CellValue::Badge(d.stage.to_string(), stage_tone(d.stage)),
                    )
                    .cell("prob", CellValue::Percent(d.probability))
                    .cell("close", CellValue::Date(d.expected_close))
            });

            let formatter = TableFormatter::new(COLUMNS, "deal");
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

    let id = store.add::<Deal>(DealDraft {
        title: args.title,
        client: args.client,
        property: args.property,
        value: Money::new(args.value, args.currency),
        stage: args.stage,
        probability: args.probability,
        expected_close: args.expected_close,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(deal) = store.get::<Deal>(&id) {
        println!(
            "{} Created deal {} ({})",
            style("✓").green(),
            style(&id).cyan(),
            deal.title
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Deal, &args.id)?;

    let deal = store
        .get::<Deal>(&id)
        .ok_or_else(|| miette::miette!("no deal with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(deal).into_diagnostic()?);
        }
        _ => print!("{}", serde_yml::to_string(deal).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Deal, &args.id)?;

    let value = args.value.map(|amount| {
        let currency = store
            .get::<Deal>(&id)
            .map(|d| d.value.currency)
            .unwrap_or_default();
        Money::new(amount, currency)
    });

    let patch = DealPatch {
        title: args.title,
        client: args.client,
        property: args.property,
        value,
        stage: args.stage,
        probability: args.probability,
        expected_close: args.expected_close,
    };

    if !store.update::<Deal>(&id, patch) {
        return Err(miette::miette!("no deal with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Updated deal {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Deal, &args.id)?;

    let title = store
        .get::<Deal>(&id)
        .ok_or_else(|| miette::miette!("no deal with id {}", id))?
        .title
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete deal {} ({})?", id, title))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Deal>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!("{} Deleted deal {}", style("✓").green(), style(&id).cyan());
    }
    Ok(())
}
