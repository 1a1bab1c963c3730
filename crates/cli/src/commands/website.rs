//! `remove-website` command
//!
//! Deletes a website after confirmation. Deployment slots and metrics are
//! always deleted with it; an emptied hosting plan is always left behind.

use armctl_common::{ManagementClient, WebsiteRemoval};
use tracing::info;

use super::required;
use crate::cli::RemoveWebsiteArgs;
use crate::confirm::{gate, Confirm, GateOutcome, Prompt};
use crate::error::CommandResult;
use crate::invoke::invoke;

const DELETE_ALL_SLOTS: bool = true;
const DELETE_METRICS: bool = true;
const DELETE_EMPTY_SERVER_FARM: bool = false;

/// The website a removal applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteTarget {
    pub resource_group: String,
    pub name: String,
}

/// What happened to the website
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// Confirmation was declined; nothing was sent
    Cancelled,
}

/// Validate the arguments
pub fn resolve(args: &RemoveWebsiteArgs) -> CommandResult<WebsiteTarget> {
    Ok(WebsiteTarget {
        resource_group: required("--resource-group", &args.resource_group)?,
        name: required("--name", &args.name)?,
    })
}

/// Confirmation prompt naming the website
pub fn prompt_for(target: &WebsiteTarget) -> Prompt {
    Prompt {
        caption: "Removing website".to_string(),
        warning: format!(
            "Are you sure you want to remove website '{}'?",
            target.name
        ),
        target: target.name.clone(),
    }
}

/// Removal options sent with every delete
pub fn removal_options() -> WebsiteRemoval {
    WebsiteRemoval {
        slot: None,
        delete_empty_server_farm: DELETE_EMPTY_SERVER_FARM,
        delete_metrics: DELETE_METRICS,
        delete_all_slots: DELETE_ALL_SLOTS,
    }
}

/// Confirm (unless forced) and delete the website
pub async fn execute(
    target: &WebsiteTarget,
    force: bool,
    client: &dyn ManagementClient,
    confirm: &dyn Confirm,
) -> CommandResult<RemoveOutcome> {
    if gate(force, &prompt_for(target), confirm) == GateOutcome::Abort {
        info!("Removal of website {} cancelled", target.name);
        return Ok(RemoveOutcome::Cancelled);
    }

    invoke(client.remove_website(&target.resource_group, &target.name, &removal_options()))
        .await?;

    info!(
        "Removed website {} from {}",
        target.name, target.resource_group
    );
    Ok(RemoveOutcome::Removed)
}
