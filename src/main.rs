use clap::Parser;
use miette::Result;
use nexa::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => nexa::cli::commands::init::run(args, &global),
        Commands::Lead(cmd) => nexa::cli::commands::lead::run(cmd, &global),
        Commands::Property(cmd) => nexa::cli::commands::property::run(cmd, &global),
        Commands::Deal(cmd) => nexa::cli::commands::deal::run(cmd, &global),
        Commands::Pledge(cmd) => nexa::cli::commands::pledge::run(cmd, &global),
        Commands::Task(cmd) => nexa::cli::commands::task::run(cmd, &global),
        Commands::Viewing(cmd) => nexa::cli::commands::viewing::run(cmd, &global),
        Commands::FollowUp(cmd) => nexa::cli::commands::follow_up::run(cmd, &global),
        Commands::Status(args) => nexa::cli::commands::status::run(args, &global),
        Commands::Config(cmd) => nexa::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => nexa::cli::commands::completions::run(args),
    }
}
