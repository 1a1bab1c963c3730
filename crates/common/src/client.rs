//! Management client seam
//!
//! Commands talk to the remote management service only through this trait,
//! so tests can substitute an in-memory implementation.

use async_trait::async_trait;

use crate::alert_rule::AlertRule;
use crate::error::ManagementError;

/// Options for deleting a website
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteRemoval {
    /// Deployment slot to delete instead of the production site
    pub slot: Option<String>,
    /// Delete the hosting plan if the site was its last tenant
    pub delete_empty_server_farm: bool,
    pub delete_metrics: bool,
    pub delete_all_slots: bool,
}

/// Remote operations used by armctl commands
#[async_trait]
pub trait ManagementClient: Send + Sync {
    /// List alert rules in a resource group, optionally only those watching `target_resource_uri`
    async fn list_rules(
        &self,
        resource_group: &str,
        target_resource_uri: Option<&str>,
    ) -> Result<Vec<AlertRule>, ManagementError>;

    /// Get a single alert rule by name
    async fn get_rule(&self, resource_group: &str, name: &str)
        -> Result<AlertRule, ManagementError>;

    /// Delete a website
    async fn remove_website(
        &self,
        resource_group: &str,
        name: &str,
        removal: &WebsiteRemoval,
    ) -> Result<(), ManagementError>;
}
