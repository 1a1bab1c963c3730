//! Remote invocation boundary
//!
//! Every command awaits its one management call through [`invoke`], which
//! strips the aggregate wrapper added by asynchronous execution so callers
//! see the underlying failure.

use armctl_common::ManagementError;
use std::future::Future;
use tracing::error;

use crate::error::{CommandError, CommandResult};

/// Await a management call and map its failure
pub async fn invoke<T, F>(call: F) -> CommandResult<T>
where
    F: Future<Output = Result<T, ManagementError>>,
{
    call.await.map_err(unwrap_failure)
}

/// Reduce an aggregated failure to its single cause.
///
/// Non-aggregate failures pass through untouched. An aggregate that does
/// not flatten to exactly one cause is reported as
/// [`CommandError::UnexpectedAggregate`].
pub fn unwrap_failure(err: ManagementError) -> CommandError {
    if !matches!(err, ManagementError::Aggregate(_)) {
        return CommandError::RemoteOperationFailed(err);
    }

    let mut causes = err.flatten();
    if causes.len() == 1 {
        if let Some(cause) = causes.pop() {
            return CommandError::RemoteOperationFailed(cause);
        }
    }

    let summary = causes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    error!(
        "Remote call returned {} aggregated failures: {}",
        causes.len(),
        summary
    );
    CommandError::UnexpectedAggregate {
        count: causes.len(),
        summary,
    }
}
