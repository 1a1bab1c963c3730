//! Alert rule resource models
//!
//! These mirror the `microsoft.insights/alertrules` resource as returned by
//! the management API. Field names follow the wire format (camelCase, with
//! `odata.type` discriminators kept as plain strings).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// An alert rule resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
    pub properties: RuleProperties,
}

/// Alert rule body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleProperties {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    pub condition: RuleCondition,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<RuleAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,
}

/// Condition that triggers the rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(rename = "odata.type")]
    pub odata_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<RuleDataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// ISO 8601 duration, e.g. `PT5M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_location_count: Option<u32>,
}

/// Resource the condition observes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDataSource {
    #[serde(rename = "odata.type")]
    pub odata_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
}

/// Action performed when the rule fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    #[serde(rename = "odata.type")]
    pub odata_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_to_service_owners: Option<bool>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub custom_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_uri: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, String>,
}

impl AlertRule {
    /// Resource URI the rule watches, if any
    pub fn target_resource_uri(&self) -> Option<&str> {
        self.properties
            .condition
            .data_source
            .as_ref()
            .and_then(|ds| ds.resource_uri.as_deref())
    }
}

/// List envelope returned by the `alertrules` collection endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlertRuleList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Vec<AlertRule>,
}

/// The service sends `null` for empty collections; read it as the empty value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
