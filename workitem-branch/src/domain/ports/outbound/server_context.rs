use async_trait::async_trait;

use crate::domain::{
    models::{RepositoryHandle, ServerContext},
    WorkItemBranchError,
};

/// Resolves the server-side context of a local repository.
#[async_trait]
pub trait ServerContextProvider: Send + Sync + 'static {
    async fn context_for(
        &self,
        repository: &RepositoryHandle,
    ) -> Result<ServerContext, WorkItemBranchError>;
}
