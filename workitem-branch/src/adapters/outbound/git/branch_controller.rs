use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{suggested_branch_name, RepositoryHandle, ServerContext, WorkItem},
    ports::{BranchDialog, BranchDialogRequest, BranchDialogResult, BranchPrompt, BranchPromptFactory},
    WorkItemBranchError,
};

use super::{create_local_branch, default_source_ref, is_valid_branch_name, resolve_commit};

/// Creates a branch on the server from a commit of the local repository.
///
/// The dialog collects name, source ref and whether to check the branch out
/// locally. The branch is created remotely first; the local branch is a
/// convenience and failing to create it does not fail the step.
pub struct CreateBranchController {
    repository: RepositoryHandle,
    dialog: Arc<dyn BranchDialog>,
    request: BranchDialogRequest,
    confirmed: Option<BranchDialogResult>,
}

impl CreateBranchController {
    pub fn new(
        repository: RepositoryHandle,
        work_items: &[WorkItem],
        dialog: Arc<dyn BranchDialog>,
        checkout: bool,
    ) -> Self {
        let request = BranchDialogRequest {
            suggested_name: work_items
                .first()
                .map(suggested_branch_name)
                .unwrap_or_default(),
            source_ref: default_source_ref(&repository),
            work_item_ids: work_items.iter().map(|item| item.id).collect(),
            checkout,
        };

        Self {
            repository,
            dialog,
            request,
            confirmed: None,
        }
    }

    pub fn request(&self) -> &BranchDialogRequest {
        &self.request
    }
}

#[async_trait]
impl BranchPrompt for CreateBranchController {
    async fn show_modal_dialog(&mut self) -> bool {
        self.confirmed = self.dialog.show(&self.request).and_then(|mut result| {
            result.branch_name = result.branch_name.trim().to_owned();
            if is_valid_branch_name(&result.branch_name) {
                Some(result)
            } else {
                tracing::warn!(branch = %result.branch_name, "Invalid branch name");
                None
            }
        });
        self.confirmed.is_some()
    }

    fn branch_name(&self) -> Option<String> {
        self.confirmed
            .as_ref()
            .map(|result| result.branch_name.clone())
    }

    async fn create_branch(
        &mut self,
        context: &ServerContext,
    ) -> Result<bool, WorkItemBranchError> {
        let Some(choice) = self.confirmed.clone() else {
            return Ok(false);
        };

        let commit_id = match resolve_commit(&self.repository.workdir, &choice.source_ref) {
            Ok(commit_id) => commit_id,
            Err(e) => {
                tracing::warn!(source = %choice.source_ref, error = %e, "Could not resolve source commit");
                return Ok(false);
            }
        };

        let created = context
            .git_http_client()
            .create_branch(context.git_repository().id, &choice.branch_name, &commit_id)
            .await?;
        if !created {
            return Ok(false);
        }
        tracing::info!(branch = %choice.branch_name, commit = %commit_id, "Created branch on server");

        if choice.checkout {
            if let Err(e) = create_local_branch(
                &self.repository.workdir,
                &choice.branch_name,
                &commit_id,
                true,
            ) {
                tracing::warn!(branch = %choice.branch_name, error = %e, "Could not check out new branch locally");
            }
        }

        Ok(true)
    }
}

/// Hands out one [`CreateBranchController`] per workflow run.
pub struct CreateBranchControllerFactory {
    dialog: Arc<dyn BranchDialog>,
    checkout: bool,
}

impl CreateBranchControllerFactory {
    pub fn new(dialog: Arc<dyn BranchDialog>, checkout: bool) -> Self {
        Self { dialog, checkout }
    }
}

impl BranchPromptFactory for CreateBranchControllerFactory {
    fn create(
        &self,
        repository: &RepositoryHandle,
        work_items: &[WorkItem],
    ) -> Box<dyn BranchPrompt> {
        Box::new(CreateBranchController::new(
            repository.clone(),
            work_items,
            self.dialog.clone(),
            self.checkout,
        ))
    }
}
