//! Output records for alert rules
//!
//! A rule is projected either in full or as a short summary. The choice is
//! made once per invocation and applied to every record.

use armctl_common::{AlertRule, RuleAction, RuleCondition};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Every field of an alert rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRuleDetails {
    pub id: String,
    pub name: String,
    pub location: String,
    pub tags: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    pub condition: RuleCondition,
    pub actions: Vec<RuleAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,
}

/// Stable subset of an alert rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRuleSummary {
    pub id: String,
    pub name: String,
    pub location: String,
    pub enabled: bool,
}

/// One emitted record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertRuleRecord {
    Full(AlertRuleDetails),
    Summary(AlertRuleSummary),
}

impl From<AlertRule> for AlertRuleDetails {
    fn from(rule: AlertRule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            location: rule.location,
            tags: rule.tags,
            description: rule.properties.description,
            enabled: rule.properties.is_enabled,
            condition: rule.properties.condition,
            actions: rule.properties.actions,
            last_updated_time: rule.properties.last_updated_time,
        }
    }
}

impl From<AlertRule> for AlertRuleSummary {
    fn from(rule: AlertRule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            location: rule.location,
            enabled: rule.properties.is_enabled,
        }
    }
}

/// Project a single rule
pub fn project(rule: AlertRule, detailed: bool) -> AlertRuleRecord {
    if detailed {
        AlertRuleRecord::Full(rule.into())
    } else {
        AlertRuleRecord::Summary(rule.into())
    }
}

impl AlertRuleRecord {
    pub fn name(&self) -> &str {
        match self {
            AlertRuleRecord::Full(d) => &d.name,
            AlertRuleRecord::Summary(s) => &s.name,
        }
    }
}
