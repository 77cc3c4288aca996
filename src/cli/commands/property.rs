//! `nexa property` command - Property listing management

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
use crate::entities::property::{
    Property, PropertyDraft, PropertyPatch, PropertyStatus, PropertyType,
};

#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// List properties with filtering
    List(ListArgs),

    /// Add a new property listing
    New(NewArgs),

    /// Show a property's details
    Show(ShowArgs),

    /// Update fields on a property
    Update(UpdateArgs),

    /// Delete a property
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by listing status
    #[arg(long, short = 's')]
    pub status: Option<PropertyStatus>,

    /// Filter by property type
    #[arg(long, short = 't')]
    pub r#type: Option<PropertyType>,

    /// Search in title and location
    #[arg(long)]
    pub search: Option<String>,

    /// Only listings priced at or below this amount
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Limit output to N items
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Listing title
    #[arg(long)]
    pub title: String,

    /// Property type (apartment/villa/townhouse/penthouse/office/retail)
    #[arg(long, short = 't', default_value = "apartment")]
    pub r#type: PropertyType,

    /// Asking price amount
    #[arg(long)]
    pub price: i64,

    /// Currency code for the price
    #[arg(long, default_value = "AED")]
    pub currency: Currency,

    /// Area or community
    #[arg(long)]
    pub location: String,

    #[arg(long, default_value_t = 0)]
    pub bedrooms: u8,

    #[arg(long, default_value_t = 0)]
    pub bathrooms: u8,

    /// Built-up area in square feet
    #[arg(long, default_value_t = 0)]
    pub area_sqft: u32,

    /// Listing status
    #[arg(long, short = 's', default_value = "available")]
    pub status: PropertyStatus,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Property id (e.g. P002, or just 2)
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Property id
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, short = 't')]
    pub r#type: Option<PropertyType>,

    /// New price amount (keeps the existing currency)
    #[arg(long)]
    pub price: Option<i64>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub bedrooms: Option<u8>,

    #[arg(long)]
    pub bathrooms: Option<u8>,

    #[arg(long)]
    pub area_sqft: Option<u32>,

    #[arg(long, short = 's')]
    pub status: Option<PropertyStatus>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Property id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("title", "TITLE", 26),
    ColumnDef::new("type", "TYPE", 11),
    ColumnDef::new("location", "LOCATION", 20),
    ColumnDef::new("price", "PRICE", 16),
    ColumnDef::new("beds", "BEDS", 5),
    ColumnDef::new("sqft", "SQFT", 8),
    ColumnDef::new("status", "STATUS", 11),
];

fn status_tone(status: PropertyStatus) -> Tone {
    match status {
        PropertyStatus::Available => Tone::Good,
        PropertyStatus::Reserved => Tone::Warn,
        PropertyStatus::Sold => Tone::Dim,
        PropertyStatus::Rented => Tone::Dim,
    }
}

pub fn run(cmd: PropertyCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PropertyCommands::List(args) => run_list(args, global),
        PropertyCommands::New(args) => run_new(args, global),
        PropertyCommands::Show(args) => run_show(args, global),
        PropertyCommands::Update(args) => run_update(args, global),
        PropertyCommands::Delete(args) => run_delete(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;

    let mut properties: Vec<&Property> = store
        .all::<Property>()
        .iter()
        .filter(|p| args.status.map_or(true, |s| p.status == s))
        .filter(|p| args.r#type.map_or(true, |t| p.property_type == t))
        .filter(|p| args.max_price.map_or(true, |max| p.price.amount <= max))
        .filter(|p| {
            args.search.as_deref().map_or(true, |q| {
                let q = q.to_lowercase();
                p.title.to_lowercase().contains(&q) || p.location.to_lowercase().contains(&q)
            })
        })
        .collect();

    if let Some(limit) = args.limit {
        properties.truncate(limit);
    }

    if args.count {
        println!("{}", properties.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&properties).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&properties).into_diagnostic()?);
        }
        format => {
            let rows = properties.iter().map(|p| {
                TableRow::new(p.id.to_string())
                    .cell("title", CellValue::Text(p.title.clone()))
                    .cell("type", CellValue::Text(p.property_type.to_string()))
                    .cell("location", CellValue::Text(p.location.clone()))
                    .cell("price", CellValue::Money(p.price))
                    .cell("beds", CellValue::Number(i64::from(p.bedrooms)))
                    .cell("sqft", CellValue::Number(i64::from(p.area_sqft)))
                    .cell(
                        "status",
                        CellValue::Badge(p.status.to_string(), status_tone(p.status)),
                    )
            });

            let formatter = TableFormatter::new(COLUMNS, "property");
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

    let id = store.add::<Property>(PropertyDraft {
        title: args.title,
        property_type: args.r#type,
        price: Money::new(args.price, args.currency),
        location: args.location,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        area_sqft: args.area_sqft,
        status: args.status,
    });
    repo.save(&store).into_diagnostic()?;

    if global.quiet {
        println!("{}", id);
    } else if let Some(property) = store.get::<Property>(&id) {
        println!(
            "{} Created property {} ({})",
            style("✓").green(),
            style(&id).cyan(),
            property.title
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Property, &args.id)?;

    let property = store
        .get::<Property>(&id)
        .ok_or_else(|| miette::miette!("no property with id {}", id))?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(property).into_diagnostic()?
            );
        }
        _ => print!("{}", serde_yml::to_string(property).into_diagnostic()?),
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Property, &args.id)?;

    let price = args.price.map(|amount| {
        let currency = store
            .get::<Property>(&id)
            .map(|p| p.price.currency)
            .unwrap_or_default();
        Money::new(amount, currency)
    });

    let patch = PropertyPatch {
        title: args.title,
        property_type: args.r#type,
        price,
        location: args.location,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        area_sqft: args.area_sqft,
        status: args.status,
    };

    if !store.update::<Property>(&id, patch) {
        return Err(miette::miette!("no property with id {}", id));
    }
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Updated property {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let (mut repo, mut store) = helpers::load_store(global)?;
    let id = parse_id(EntityKind::Property, &args.id)?;

    let title = store
        .get::<Property>(&id)
        .ok_or_else(|| miette::miette!("no property with id {}", id))?
        .title
        .clone();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete property {} ({})?", id, title))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.remove::<Property>(&id);
    repo.save(&store).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Deleted property {}",
            style("✓").green(),
            style(&id).cyan()
        );
    }
    Ok(())
}
