use std::sync::Arc;

use async_trait::async_trait;
use az_devops::{Credential, RepoClient};

use crate::domain::{
    models::{RepositoryHandle, ServerContext},
    ports::ServerContextProvider,
    WorkItemBranchError,
};

use super::{AzureDevOpsClient, AzureRemote};

/// Builds a server context from the Azure DevOps remote of a local repository.
///
/// Hosted remotes are resolved against `api_base_url`; Azure DevOps Server
/// remotes against the server named in the remote itself.
pub struct AzureDevOpsContextProvider {
    api_base_url: String,
    credential: Credential,
}

impl AzureDevOpsContextProvider {
    pub fn new(api_base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            credential,
        }
    }
}

#[async_trait]
impl ServerContextProvider for AzureDevOpsContextProvider {
    async fn context_for(
        &self,
        repository: &RepositoryHandle,
    ) -> Result<ServerContext, WorkItemBranchError> {
        let remote = AzureRemote::parse(&repository.remote_url).ok_or_else(|| {
            WorkItemBranchError::server_context(format!(
                "{} is not an Azure DevOps remote",
                repository.remote_url
            ))
        })?;

        let client = RepoClient::new(
            remote.api_base_url(&self.api_base_url),
            &remote.organization,
            &remote.project,
            self.credential.clone(),
        )
        .map_err(|e| WorkItemBranchError::server_context(e.to_string()))?;

        let git_repository = client
            .get_repository(&remote.repository)
            .await
            .map_err(|e| WorkItemBranchError::transport(e.to_string()))?;

        let team_project = match git_repository.project.clone() {
            Some(project) => project,
            None => client
                .get_project()
                .await
                .map_err(|e| WorkItemBranchError::transport(e.to_string()))?,
        };

        tracing::debug!(
            organization = %remote.organization,
            project = %team_project.name,
            repository = %git_repository.name,
            "Resolved server context"
        );

        let api = Arc::new(AzureDevOpsClient::new(client));
        Ok(ServerContext::new(
            git_repository,
            team_project,
            api.clone(),
            api,
        ))
    }
}
