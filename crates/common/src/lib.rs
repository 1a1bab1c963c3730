//! armctl-common
//!
//! Shared pieces of the armctl workspace:
//! - Configuration loading (file + environment)
//! - Alert rule resource models as returned by the management API
//! - The `ManagementClient` seam and its HTTP implementation
//! - Error types for remote calls and configuration

pub mod alert_rule;
pub mod client;
pub mod config;
pub mod error;
pub mod http;

// Re-export commonly used types
pub use alert_rule::{AlertRule, RuleAction, RuleCondition, RuleDataSource, RuleProperties};
pub use client::{ManagementClient, WebsiteRemoval};
pub use config::{ApiVersions, Config, ManagementConfig};
pub use error::{ConfigError, ManagementError};
pub use http::HttpManagementClient;
