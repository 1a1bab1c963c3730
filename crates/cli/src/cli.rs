//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// armctl - manage alert rules and websites through the resource manager API
#[derive(Parser, Debug)]
#[command(name = "armctl", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for returned records
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Path to the configuration file
    #[arg(long, global = true, env = "ARMCTL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get alert rules in a resource group
    GetAlertRule(GetAlertRuleArgs),

    /// Remove a website
    RemoveWebsite(RemoveWebsiteArgs),
}

/// Arguments for `get-alert-rule`
///
/// Without `--name` or `--target-resource-uri` every rule in the resource
/// group is listed.
#[derive(Args, Debug, Clone, Default)]
pub struct GetAlertRuleArgs {
    /// The resource group name
    #[arg(long)]
    pub resource_group: String,

    /// The alert rule name
    #[arg(long, conflicts_with = "target_resource_uri")]
    pub name: Option<String>,

    /// The alert rule target resource uri
    #[arg(long)]
    pub target_resource_uri: Option<String>,

    /// Return records with all details (the default returns only id, name, location and status)
    #[arg(long)]
    pub detailed_output: bool,
}

/// Arguments for `remove-website`
#[derive(Args, Debug, Clone, Default)]
pub struct RemoveWebsiteArgs {
    /// The resource group name
    #[arg(long)]
    pub resource_group: String,

    /// The website name
    #[arg(long)]
    pub name: String,

    /// Do not ask for confirmation
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_alert_rule() {
        let cli = Cli::try_parse_from([
            "armctl",
            "get-alert-rule",
            "--resource-group",
            "rg1",
            "--name",
            "r1",
            "--detailed-output",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::GetAlertRule(args)) => {
                assert_eq!(args.resource_group, "rg1");
                assert_eq!(args.name.as_deref(), Some("r1"));
                assert!(args.detailed_output);
                assert!(args.target_resource_uri.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_name_conflicts_with_target_uri() {
        let err = Cli::try_parse_from([
            "armctl",
            "get-alert-rule",
            "--resource-group",
            "rg1",
            "--name",
            "r1",
            "--target-resource-uri",
            "/subscriptions/s/x",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_parse_remove_website_with_global_flags() {
        let cli = Cli::try_parse_from([
            "armctl",
            "remove-website",
            "--resource-group",
            "rg1",
            "--name",
            "site1",
            "--force",
            "-vv",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Some(Commands::RemoveWebsite(args)) => {
                assert_eq!(args.name, "site1");
                assert!(args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_remove_website_requires_name() {
        let err = Cli::try_parse_from(["armctl", "remove-website", "--resource-group", "rg1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
