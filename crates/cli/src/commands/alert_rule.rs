//! `get-alert-rule` command
//!
//! Lists the alert rules of a resource group (optionally only those watching
//! one target resource) or fetches a single rule by name.

use armctl_common::ManagementClient;
use tracing::{debug, info};

use super::required;
use crate::cli::GetAlertRuleArgs;
use crate::error::{CommandError, CommandResult};
use crate::invoke::invoke;
use crate::output::Sink;
use crate::projection::{project, AlertRuleRecord};

/// The input mode selected for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertRuleQuery {
    /// Every rule in the resource group
    List { resource_group: String },
    /// Rules in the resource group that watch one resource
    ListForTarget {
        resource_group: String,
        target_resource_uri: String,
    },
    /// One rule by name
    Get {
        resource_group: String,
        name: String,
    },
}

/// Pick the parameter set and validate its fields
pub fn resolve(args: &GetAlertRuleArgs) -> CommandResult<AlertRuleQuery> {
    let resource_group = required("--resource-group", &args.resource_group)?;

    match (args.name.as_deref(), args.target_resource_uri.as_deref()) {
        (Some(_), Some(_)) => Err(CommandError::invalid(
            "--name and --target-resource-uri cannot be used together",
        )),
        (Some(name), None) => Ok(AlertRuleQuery::Get {
            resource_group,
            name: required("--name", name)?,
        }),
        (None, Some(uri)) => Ok(AlertRuleQuery::ListForTarget {
            resource_group,
            target_resource_uri: required("--target-resource-uri", uri)?,
        }),
        (None, None) => Ok(AlertRuleQuery::List { resource_group }),
    }
}

/// Run the query and emit one record per rule, in service order.
///
/// Returns the number of records emitted.
pub async fn execute(
    query: &AlertRuleQuery,
    detailed: bool,
    client: &dyn ManagementClient,
    sink: &mut dyn Sink<AlertRuleRecord>,
) -> CommandResult<usize> {
    let rules = match query {
        AlertRuleQuery::Get {
            resource_group,
            name,
        } => {
            info!("Getting alert rule {} in {}", name, resource_group);
            vec![invoke(client.get_rule(resource_group, name)).await?]
        }
        AlertRuleQuery::List { resource_group } => {
            info!("Listing alert rules in {}", resource_group);
            invoke(client.list_rules(resource_group, None)).await?
        }
        AlertRuleQuery::ListForTarget {
            resource_group,
            target_resource_uri,
        } => {
            info!(
                "Listing alert rules in {} for {}",
                resource_group, target_resource_uri
            );
            invoke(client.list_rules(resource_group, Some(target_resource_uri.as_str())))
                .await?
        }
    };

    let count = rules.len();
    for rule in rules {
        let record = project(rule, detailed);
        debug!("Emitting alert rule {}", record.name());
        sink.emit(record)?;
    }

    Ok(count)
}
