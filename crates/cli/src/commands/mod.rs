//! Command implementations
//!
//! Each command is split into a pure `resolve` step that validates the
//! parsed arguments and an async `execute` step that performs the single
//! remote call.

pub mod alert_rule;
pub mod website;

use crate::error::{CommandError, CommandResult};

/// Require a non-blank value for `flag`
fn required(flag: &str, value: &str) -> CommandResult<String> {
    if value.trim().is_empty() {
        return Err(CommandError::invalid(format!("{} must not be empty", flag)));
    }
    Ok(value.to_string())
}
