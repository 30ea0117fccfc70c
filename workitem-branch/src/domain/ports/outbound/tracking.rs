use async_trait::async_trait;
use az_devops::ArtifactLink;
use uuid::Uuid;

use crate::domain::{
    models::{LinkResult, WorkItem},
    WorkItemBranchError,
};

/// Work item tracking API.
#[async_trait]
pub trait WitHttpClient: Send + Sync + 'static {
    /// Attach an artifact link to a work item.
    async fn add_artifact_link(
        &self,
        work_item_id: i32,
        link: &ArtifactLink,
    ) -> Result<LinkResult, WorkItemBranchError>;

    /// Ids matching a WIQL query. The query text is passed through untouched.
    async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<i32>, WorkItemBranchError>;

    /// Full work items for `ids`, in the same order.
    async fn get_work_items(&self, ids: &[i32]) -> Result<Vec<WorkItem>, WorkItemBranchError>;
}

/// Git API.
#[async_trait]
pub trait GitHttpClient: Send + Sync + 'static {
    /// Create `branch_name` at `new_object_id`. `Ok(false)` when the server refused the ref update.
    async fn create_branch(
        &self,
        repository_id: Uuid,
        branch_name: &str,
        new_object_id: &str,
    ) -> Result<bool, WorkItemBranchError>;
}
