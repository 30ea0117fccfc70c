mod context;
mod remote;

pub use context::AzureDevOpsContextProvider;
pub use remote::{is_azure_devops_remote, AzureRemote};

use async_trait::async_trait;
use az_devops::{ArtifactLink, RepoClientError};
use uuid::Uuid;

use crate::domain::{
    models::{LinkResult, WorkItem},
    ports::{GitHttpClient, WitHttpClient},
    WorkItemBranchError,
};

/// Adapter that wraps an Azure DevOps `RepoClient` to implement the tracking and git ports.
pub struct AzureDevOpsClient {
    client: az_devops::RepoClient,
}

impl AzureDevOpsClient {
    pub fn new(client: az_devops::RepoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WitHttpClient for AzureDevOpsClient {
    async fn add_artifact_link(
        &self,
        work_item_id: i32,
        link: &ArtifactLink,
    ) -> Result<LinkResult, WorkItemBranchError> {
        self.client
            .add_artifact_link(work_item_id, link)
            .await
            .map_err(to_transport_error)
    }

    async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<i32>, WorkItemBranchError> {
        tracing::debug!(wiql_query = %wiql, "Executing project-scope WIQL query");
        self.client
            .query_work_item_ids(wiql)
            .await
            .map_err(to_transport_error)
    }

    async fn get_work_items(&self, ids: &[i32]) -> Result<Vec<WorkItem>, WorkItemBranchError> {
        self.client
            .get_work_items(ids)
            .await
            .map_err(to_transport_error)
    }
}

#[async_trait]
impl GitHttpClient for AzureDevOpsClient {
    async fn create_branch(
        &self,
        repository_id: Uuid,
        branch_name: &str,
        new_object_id: &str,
    ) -> Result<bool, WorkItemBranchError> {
        let result = self
            .client
            .create_branch(repository_id, branch_name, new_object_id)
            .await
            .map_err(to_transport_error)?;

        if !result.success {
            tracing::warn!(
                branch = %result.name,
                status = ?result.update_status,
                message = ?result.custom_message,
                "Server refused ref update"
            );
        }
        Ok(result.success)
    }
}

fn to_transport_error(error: RepoClientError) -> WorkItemBranchError {
    WorkItemBranchError::transport(error.to_string())
}
