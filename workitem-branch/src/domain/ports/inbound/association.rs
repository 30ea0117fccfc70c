use async_trait::async_trait;

use crate::domain::{models::ServerContext, WorkItemBranchError};

/// Records a branch ↔ work item link on the tracking service.
#[async_trait]
pub trait AssociationService: Send + Sync + 'static {
    /// Link `branch_name` in the context's repository to `work_item_id`.
    ///
    /// `Ok(true)` when the link exists afterwards (created now or already there),
    /// `Ok(false)` when the server refused it, `Err` when the server could not be reached.
    async fn create_work_item_branch_association(
        &self,
        context: &ServerContext,
        branch_name: &str,
        work_item_id: i32,
    ) -> Result<bool, WorkItemBranchError>;
}
