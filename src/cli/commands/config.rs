//! `nexa config` command - User settings

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::settings::Settings;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all settings with their current values
    List,

    /// Read one setting
    Get(GetArgs),

    /// Change one setting and persist it
    Set(SetArgs),
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Setting key (e.g. currency, accent.real-estate)
    pub key: String,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Setting key
    pub key: String,

    /// New value
    pub value: String,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::List => {
            let settings = Settings::load();
            for (key, value) in settings.entries() {
                println!("{} = {}", style(key).cyan(), value);
            }
            Ok(())
        }
        ConfigCommands::Get(args) => {
            let settings = Settings::load();
            match settings.get(&args.key) {
                Some(value) => {
                    println!("{}", value);
                    Ok(())
                }
                None => Err(miette::miette!(
                    "unknown setting '{}' (valid: accent.real-estate, accent.business-setup, currency, timezone)",
                    args.key
                )),
            }
        }
        ConfigCommands::Set(args) => {
            let mut settings = Settings::load();
            settings
                .set(&args.key, &args.value)
                .map_err(|e| miette::miette!("{}", e))?;
            settings.save().map_err(|e| miette::miette!("{}", e))?;

            if !global.quiet {
                println!(
                    "{} Set {} = {}",
                    style("✓").green(),
                    style(&args.key).cyan(),
                    args.value
                );
            }
            Ok(())
        }
    }
}
