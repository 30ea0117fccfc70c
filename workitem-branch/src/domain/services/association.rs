use async_trait::async_trait;

use crate::domain::{
    models::{BranchAssociation, LinkResult, ServerContext},
    ports::AssociationService,
    WorkItemBranchError,
};

/// Links branches to work items through the context's tracking client.
#[derive(Clone, Copy, Debug, Default)]
pub struct WitAssociationService;

impl WitAssociationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AssociationService for WitAssociationService {
    #[tracing::instrument(skip(self, context), fields(repository = %context.git_repository().name))]
    async fn create_work_item_branch_association(
        &self,
        context: &ServerContext,
        branch_name: &str,
        work_item_id: i32,
    ) -> Result<bool, WorkItemBranchError> {
        let association = BranchAssociation::new(context, branch_name, work_item_id);
        let link = association.artifact_link();

        let result = context
            .wit_http_client()
            .add_artifact_link(association.work_item_id, &link)
            .await?;

        match &result {
            LinkResult::Created => {
                tracing::info!(uri = %link.uri, "Linked branch to work item");
            }
            LinkResult::AlreadyExists => {
                tracing::info!(uri = %link.uri, "Branch was already linked to work item");
            }
            LinkResult::Rejected(reason) => {
                tracing::warn!(uri = %link.uri, reason = %reason, "Server rejected branch link");
            }
        }

        Ok(result.is_linked())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::*;
    use crate::mock::{server_context, MockGitClient, MockWitClient};

    #[tokio::test]
    async fn accepted_link_is_success() {
        let wit = Arc::new(MockWitClient::accepting());
        let context = server_context(Uuid::nil(), Uuid::nil(), wit.clone(), Arc::new(MockGitClient::succeeding()));

        let linked = WitAssociationService::new()
            .create_work_item_branch_association(&context, "branchName", 10)
            .await
            .unwrap();

        assert!(linked);
        let calls = wit.link_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 10);
        assert_eq!(
            calls[0].1.uri,
            "vstfs:///Git/Ref/00000000-0000-0000-0000-000000000000%2F\
             00000000-0000-0000-0000-000000000000%2FGBbranchName"
        );
    }

    #[tokio::test]
    async fn existing_link_is_success() {
        let wit = Arc::new(MockWitClient::with_link_result(LinkResult::AlreadyExists));
        let context = server_context(Uuid::nil(), Uuid::nil(), wit, Arc::new(MockGitClient::succeeding()));

        let linked = WitAssociationService::new()
            .create_work_item_branch_association(&context, "branchName", 10)
            .await
            .unwrap();

        assert!(linked);
    }

    #[tokio::test]
    async fn rejected_link_is_false_not_error() {
        let wit = Arc::new(MockWitClient::with_link_result(LinkResult::Rejected(
            "invalid id".to_owned(),
        )));
        let context = server_context(Uuid::nil(), Uuid::nil(), wit, Arc::new(MockGitClient::succeeding()));

        let linked = WitAssociationService::new()
            .create_work_item_branch_association(&context, "branchName", -1)
            .await
            .unwrap();

        assert!(!linked);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let wit = Arc::new(MockWitClient::unreachable());
        let context = server_context(Uuid::nil(), Uuid::nil(), wit, Arc::new(MockGitClient::succeeding()));

        let result = WitAssociationService::new()
            .create_work_item_branch_association(&context, "branchName", 10)
            .await;

        assert!(matches!(result, Err(WorkItemBranchError::Transport(_))));
    }

    #[tokio::test]
    async fn link_uses_project_and_repository_ids() {
        let project_id = Uuid::from_u128(1);
        let repository_id = Uuid::from_u128(2);
        let wit = Arc::new(MockWitClient::accepting());
        let context = server_context(repository_id, project_id, wit.clone(), Arc::new(MockGitClient::succeeding()));

        WitAssociationService::new()
            .create_work_item_branch_association(&context, "refs/heads/feature", 7)
            .await
            .unwrap();

        let expected = BranchAssociation {
            repository_id,
            project_id,
            work_item_id: 7,
            branch_ref: "feature".to_owned(),
        };
        assert_eq!(wit.link_calls()[0].1, expected.artifact_link());
    }
}
