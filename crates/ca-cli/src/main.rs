use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ca_cli::commands::{charge, convert, info, value};
use ca_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output on stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Info { file, json } => info::run(&mut stdout, file, &config, *json)?,
        Commands::Charge { file, window, json } => {
            charge::run(&mut stdout, file, &config, &window.to_window(), *json)?;
        }
        Commands::Convert { file, at } => convert::run(&mut stdout, file, &config, &at.to_input())?,
        Commands::Value {
            file,
            at,
            channel,
            json,
        } => value::run(&mut stdout, file, &config, &at.to_input(), *channel, *json)?,
    }

    Ok(())
}
