mod cli;
mod commands;
mod confirm;
mod error;
mod invoke;
mod output;
mod projection;

use anyhow::{Context, Result};
use armctl_common::{Config, HttpManagementClient};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::website::RemoveOutcome;
use confirm::TerminalConfirm;
use output::{print_info, print_success, Renderer};
use projection::AlertRuleRecord;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    setup_logging(cli.verbose)?;

    let Some(command) = cli.command else {
        // No subcommand provided, show help
        println!("No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    match command {
        cli::Commands::GetAlertRule(args) => {
            // Validate before touching configuration or the network
            let query = commands::alert_rule::resolve(&args)?;
            let client = connect(cli.config.as_deref())?;

            let mut renderer: Renderer<_, AlertRuleRecord> =
                Renderer::new(std::io::stdout().lock(), cli.output);
            runtime()?.block_on(commands::alert_rule::execute(
                &query,
                args.detailed_output,
                &client,
                &mut renderer,
            ))?;
            renderer.finish()?;
            Ok(())
        }
        cli::Commands::RemoveWebsite(args) => {
            let target = commands::website::resolve(&args)?;
            let client = connect(cli.config.as_deref())?;

            let outcome = runtime()?.block_on(commands::website::execute(
                &target,
                args.force,
                &client,
                &TerminalConfirm,
            ))?;
            match outcome {
                RemoveOutcome::Removed => {
                    print_success(&format!("Removed website {}", target.name))
                }
                RemoveOutcome::Cancelled => {
                    print_info(&format!("Removal of website {} cancelled", target.name))
                }
            }
            Ok(())
        }
    }
}

/// Load configuration and build the management client
fn connect(config_path: Option<&Path>) -> Result<HttpManagementClient> {
    let config = Config::load_with(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    HttpManagementClient::new(config.management).context("Failed to create management client")
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

fn setup_logging(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
