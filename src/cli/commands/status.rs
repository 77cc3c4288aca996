//! `nexa status` command - Workspace dashboard

use clap::Args;
use console::style;
use miette::Result;

use crate::cli::helpers;
use crate::cli::GlobalOpts;
use crate::core::brand::Brand;
use crate::core::money::Money;
use crate::core::settings::Settings;
use crate::entities::{
    Deal, DealStage, FollowUp, FollowUpStatus, Lead, Pledge, Property, Task, TaskStatus,
    Viewing, ViewingStatus,
};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Scope lead counts to one brand
    #[arg(long, short = 'b')]
    pub brand: Option<Brand>,
}

pub fn run(args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let (_repo, store) = helpers::load_store(global)?;
    let settings = Settings::load();
    let currency = settings.currency;

    let leads = store.all::<Lead>();
    let lead_total = leads
        .iter()
        .filter(|l| args.brand.map_or(true, |b| l.brand == b))
        .count();
    let re_leads = leads.iter().filter(|l| l.brand == Brand::RealEstate).count();
    let bs_leads = leads
        .iter()
        .filter(|l| l.brand == Brand::BusinessSetup)
        .count();

    let deals = store.all::<Deal>();
    let open_pipeline = deals
        .iter()
        .filter(|d| !d.stage.is_closed())
        .fold(Money::zero(currency), |acc, d| acc.plus(d.value));
    let won_value = deals
        .iter()
        .filter(|d| d.stage == DealStage::Won)
        .fold(Money::zero(currency), |acc, d| acc.plus(d.value));

    let outstanding = store
        .all::<Pledge>()
        .iter()
        .fold(Money::zero(currency), |acc, p| acc.plus(p.pending()));

    let pending_tasks = store
        .all::<Task>()
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .count();
    let scheduled_viewings = store
        .all::<Viewing>()
        .iter()
        .filter(|v| v.status == ViewingStatus::Scheduled)
        .count();
    let pending_follow_ups = store
        .all::<FollowUp>()
        .iter()
        .filter(|f| f.status == FollowUpStatus::Pending)
        .count();

    if global.quiet {
        println!(
            "{} leads, {} deals, {} pending tasks",
            lead_total,
            deals.len(),
            pending_tasks
        );
        return Ok(());
    }

    println!("{}", style("Nexa CRM").bold());
    println!();
    println!(
        "  {:<12} {:>4}   real-estate {} / business-setup {}",
        "Leads",
        style(lead_total).cyan(),
        re_leads,
        bs_leads
    );
    println!(
        "  {:<12} {:>4}",
        "Properties",
        style(store.all::<Property>().len()).cyan()
    );
    println!(
        "  {:<12} {:>4}   open pipeline {}, won {}",
        "Deals",
        style(deals.len()).cyan(),
        style(open_pipeline).yellow(),
        style(won_value).green()
    );
    println!(
        "  {:<12} {:>4}   outstanding {}",
        "Pledges",
        style(store.all::<Pledge>().len()).cyan(),
        style(outstanding).yellow()
    );
    println!(
        "  {:<12} {:>4}   {} pending",
        "Tasks",
        style(store.all::<Task>().len()).cyan(),
        pending_tasks
    );
    println!(
        "  {:<12} {:>4}   {} scheduled",
        "Viewings",
        style(store.all::<Viewing>().len()).cyan(),
        scheduled_viewings
    );
    println!(
        "  {:<12} {:>4}   {} pending",
        "Follow-ups",
        style(store.all::<FollowUp>().len()).cyan(),
        pending_follow_ups
    );

    Ok(())
}
