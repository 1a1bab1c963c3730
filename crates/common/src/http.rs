//! HTTP implementation of the management client
//!
//! Talks to the resource manager REST API. Each request runs on its own
//! tokio task; a failure inside the task is reported wrapped in
//! [`ManagementError::Aggregate`], the same way a faulted task surfaces its
//! exceptions. Callers unwrap it at their boundary.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::alert_rule::{AlertRule, AlertRuleList};
use crate::client::{ManagementClient, WebsiteRemoval};
use crate::config::ManagementConfig;
use crate::error::{ConfigError, ManagementError};

/// Management API client backed by reqwest
#[derive(Clone)]
pub struct HttpManagementClient {
    client: reqwest::Client,
    config: ManagementConfig,
    subscription_id: String,
}

/// Error envelope used by the resource manager
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl HttpManagementClient {
    /// Create a new client from validated settings
    pub fn new(config: ManagementConfig) -> Result<Self, ConfigError> {
        let subscription_id = config
            .subscription_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("management.subscription_id"))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref token) = config.access_token {
            let auth_value = format!("Bearer {}", token);
            let value =
                HeaderValue::from_str(&auth_value).map_err(|e| ConfigError::InvalidValue {
                    key: "ARMCTL_ACCESS_TOKEN".to_string(),
                    message: e.to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "management".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            config,
            subscription_id,
        })
    }

    /// Resource group scope URL, with the provider segment casing the service expects
    fn resource_group_url(&self, resource_group_segment: &str, resource_group: &str) -> String {
        format!(
            "{}/subscriptions/{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.subscription_id),
            resource_group_segment,
            urlencoding::encode(resource_group)
        )
    }

    fn alert_rules_url(&self, resource_group: &str) -> String {
        format!(
            "{}/providers/microsoft.insights/alertrules",
            self.resource_group_url("resourcegroups", resource_group)
        )
    }

    fn list_rules_url(&self, resource_group: &str, target_resource_uri: Option<&str>) -> String {
        let mut url = format!(
            "{}?api-version={}",
            self.alert_rules_url(resource_group),
            self.config.api_versions.insights
        );
        if let Some(uri) = target_resource_uri {
            let filter = format!("targetResourceUri eq '{}'", uri);
            url.push_str("&$filter=");
            url.push_str(&urlencoding::encode(&filter));
        }
        url
    }

    fn get_rule_url(&self, resource_group: &str, name: &str) -> String {
        format!(
            "{}/{}?api-version={}",
            self.alert_rules_url(resource_group),
            urlencoding::encode(name),
            self.config.api_versions.insights
        )
    }

    fn remove_website_url(
        &self,
        resource_group: &str,
        name: &str,
        removal: &WebsiteRemoval,
    ) -> String {
        let mut url = format!(
            "{}/providers/Microsoft.Web/sites/{}",
            self.resource_group_url("resourceGroups", resource_group),
            urlencoding::encode(name)
        );
        if let Some(ref slot) = removal.slot {
            url.push_str("/slots/");
            url.push_str(&urlencoding::encode(slot));
        }
        format!(
            "{}?deleteEmptyServerFarm={}&deleteMetrics={}&deleteAllSlots={}&api-version={}",
            url,
            removal.delete_empty_server_farm,
            removal.delete_metrics,
            removal.delete_all_slots,
            self.config.api_versions.web
        )
    }
}

/// Run a request on its own task, wrapping any failure the way a faulted task reports it
async fn run_task<F, T>(fut: F) -> Result<T, ManagementError>
where
    F: Future<Output = Result<T, ManagementError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ManagementError::Aggregate(vec![e])),
        Err(join) => Err(ManagementError::Aggregate(vec![ManagementError::Transport(
            format!("request task failed: {}", join),
        )])),
    }
}

/// Turn a non-success response into a typed error
async fn check_status(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, ManagementError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let envelope = serde_json::from_str::<ErrorEnvelope>(&text).ok();

    if status == reqwest::StatusCode::NOT_FOUND {
        let detail = match envelope {
            Some(env) if !env.error.message.is_empty() => {
                if env.error.code.is_empty() {
                    env.error.message
                } else {
                    format!("{}: {}", env.error.code, env.error.message)
                }
            }
            _ => what.to_string(),
        };
        return Err(ManagementError::NotFound(detail));
    }

    let (code, message) = match envelope {
        Some(env) => (env.error.code, env.error.message),
        None => (
            status
                .canonical_reason()
                .unwrap_or("UnknownError")
                .to_string(),
            if text.is_empty() {
                "unknown error".to_string()
            } else {
                text
            },
        ),
    };

    Err(ManagementError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

#[async_trait]
impl ManagementClient for HttpManagementClient {
    async fn list_rules(
        &self,
        resource_group: &str,
        target_resource_uri: Option<&str>,
    ) -> Result<Vec<AlertRule>, ManagementError> {
        let url = self.list_rules_url(resource_group, target_resource_uri);
        let client = self.client.clone();
        let what = format!("alert rules in resource group '{}'", resource_group);

        debug!("GET {}", url);

        run_task(async move {
            let response = client.get(&url).send().await?;
            let response = check_status(response, &what).await?;
            let list: AlertRuleList = response.json().await?;
            Ok::<_, ManagementError>(list.value)
        })
        .await
    }

    async fn get_rule(
        &self,
        resource_group: &str,
        name: &str,
    ) -> Result<AlertRule, ManagementError> {
        let url = self.get_rule_url(resource_group, name);
        let client = self.client.clone();
        let what = format!("alert rule '{}' in resource group '{}'", name, resource_group);

        debug!("GET {}", url);

        run_task(async move {
            let response = client.get(&url).send().await?;
            let response = check_status(response, &what).await?;
            let rule: AlertRule = response.json().await?;
            Ok::<_, ManagementError>(rule)
        })
        .await
    }

    async fn remove_website(
        &self,
        resource_group: &str,
        name: &str,
        removal: &WebsiteRemoval,
    ) -> Result<(), ManagementError> {
        let url = self.remove_website_url(resource_group, name, removal);
        let client = self.client.clone();
        let what = format!("website '{}' in resource group '{}'", name, resource_group);

        info!("Deleting website {}/{}", resource_group, name);
        debug!("DELETE {}", url);

        run_task(async move {
            let response = client.delete(&url).send().await?;
            check_status(response, &what).await?;
            Ok::<_, ManagementError>(())
        })
        .await
    }
}
