//! `nexa pledge` command - Payment commitment tracking
//!
//! The outstanding balance is derived from amount and paid, so there is
//! no flag to set it directly. `pledge pay` adds to the paid total.

use clap::Subcommand;
use console::style;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{self, parse_id};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::EntityKind;
use crate::core::money::{Currency, Money};
use crate::core::repository::Repository;
use crate::entities::pledge::{Pledge, PledgeDraft, PledgePatch};

#[derive(Subcommand, Debug)]
pub enum PledgeCommands {
    /// List pledges
    List(ListArgs),

    /// Record a new pledge
    New(NewArgs),

    /// Show a pledge's details including the outstanding balance
    Show(ShowArgs),

    /// Update fields on a pledge
    Update(UpdateArgs),

    /// Record a payment against a pledge
    Pay(PayArgs),

    /// Delete a pledge
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in client and property
    #[arg(long)]
    pub search: Option<String>,

    /// Only pledges with an outstanding balance
    #[arg(long)]
    pub outstanding: bool,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Client name
    #[arg(long)]
    pub client: String,

    /// Property reference
    #[arg(long)]
    pub property: String,

    /// Total committed amount
    #[arg(long)]
    pub amount: i64,

    /// Amount already paid
    #[arg(long, default_value_t = 0)]
    pub paid: i64,

    /// Currency code
    #[arg(long, default_value = "AED")]
    pub currency: Currency,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Pledge id (e.g. PL001, or just 1)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Pledge id
    pub id: String,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub property: Option<String>,

    /// New committed amount (keeps the existing currency)
    #[arg(long)]
    pub amount: Option<i64>,

    /// New paid total (keeps the existing currency)
    #[arg(long)]
    pub paid: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct PayArgs {
    /// Pledge id
    pub id: String,

    /// Payment amount to add to the paid total
    pub amount: i64,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Pledge id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("client", "CLIENT", 22),
    ColumnDef::new("property", "PROPERTY", 24),
    ColumnDef::new("amount", "AMOUNT", 16),
    ColumnDef::new("paid", "PAID", 16),
    ColumnDef::new("pending", "PENDING", 16),
];

pub fn run(cmd: PledgeCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PledgeCommands::List(args) => run_list(args, global),
        PledgeCommands::New(args) => run_new(args, global),
        PledgeCommands::Show(args) => run_show(args, global),
        PledgeCommands::Update(args) => run_update(args, global),
        PledgeCommands::Pay(args) => run_pay(args, global),
        PledgeCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut pledges: Vec<&Pledge> = store
        .all::<Pledge>()
        .iter()
        .filter(|p| !args.outstanding || p.pending().amount > 0)
        .filter(|p| {
            args.search.as_deref().map_or(true, |q| {
                let q = q.to_lowercase();
                p.client.to_lowercase().contains(&q) || p.property.to_lowercase().contains(&q)
            })
        })
        .collect();

    if let Some(limit) = args.limit {
        pledges.truncate(limit);
    }

    if args.count {
        println!("{}", pledges.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&pledges).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&pledges).into_diagnostic()?);
        }
        format => {
            let rows = pledges.iter().map(|p| {
                TableRow::new(p.id.to_string())
                    .cell("client", CellValue::Text(p.client.clone()))
                    .cell("property", CellValue::Text(p.property.clone()))
                    .cell("amount", CellValue::Money(p.amount))
                    .cell("paid", CellValue::Money(p.paid))
                    .cell("pending", CellValue::Money(p.pending()))
            });

            let formatter = TableFormatter::new(COLUMNS, "pledge");
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

    let id = store.add::<Pledge>(PledgeDraft {
        client: args.client,
        property: args.property,
        amount: Money::new(args.amount, args.currency),
        paid: Money::new(args.paid, args.currency),
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(pledge) = store.get::<Pledge>(&id) {
        println!(
            "{} Created pledge {} ({}, {})",
            style("✓").green(),
            style(&id).cyan(),
            pledge.client,
            pledge.amount
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Pledge, &args.id)?;

    let pledge = store
        .get::<Pledge>(&id)
        .ok_or_else(|| miette::miette!("no pledge with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(pledge).into_diagnostic()?
            );
        }
        _ => {
            print!("{}", serde_yml::to_string(pledge).into_diagnostic()?);
            println!("pending: {}", pledge.pending());
        }
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Pledge, &args.id)?;

    let currency = store
        .get::<Pledge>(&id)
        .map(|p| p.amount.currency)
        .unwrap_or_default();

    let patch = PledgePatch {
        client: args.client,
        property: args.property,
        amount: args.amount.map(|a| Money::new(a, currency)),
        paid: args.paid.map(|a| Money::new(a, currency)),
    };

    if !store.update::<Pledge>(&id, patch) {
        return Err(miette::miette!("no pledge with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Updated pledge {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_pay(args: PayArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Pledge, &args.id)?;

    let prior = store
        .get::<Pledge>(&id)
        .ok_or_else(|| miette::miette!("no pledge with id {}", id))?
        .paid;
    let paid = prior.plus(Money::new(args.amount, prior.currency));

    store.update::<Pledge>(
        &id,
        PledgePatch {
            paid: Some(paid),
            ..Default::default()
        },
    );
    repo.save(&store).into_diagnostic()?;

    if let Some(pledge) = store.get::<Pledge>(&id) {
        if !global.quiet {
            println!(
                "{} Recorded payment on {}, pending {}",
                style("✓").green(),
                style(&id).cyan(),
                pledge.pending()
            );
        }
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Pledge, &args.id)?;

    let client = store
        .get::<Pledge>(&id)
        .ok_or_else(|| miette::miette!("no pledge with id {}", id))?
        .client
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete pledge {} ({})?", id, client))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Pledge>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Deleted pledge {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}
