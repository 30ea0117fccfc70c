use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{
    models::BranchOutcome,
    ports::{
        AssociationService, BranchPromptFactory, ServerContextProvider, VcsContextResolver,
        WorkItemSelection,
    },
    WorkItemBranchError,
};

/// Drives "create a branch for the selected work item".
///
/// Each step starts only after the previous one has answered:
/// resolve repository → read selection → prompt → create branch → link.
pub struct BranchCreationOrchestrator {
    project: PathBuf,
    resolver: Arc<dyn VcsContextResolver>,
    selection: Arc<dyn WorkItemSelection>,
    prompts: Arc<dyn BranchPromptFactory>,
    contexts: Arc<dyn ServerContextProvider>,
    associations: Arc<dyn AssociationService>,
}

impl BranchCreationOrchestrator {
    pub fn new(
        project: impl Into<PathBuf>,
        resolver: Arc<dyn VcsContextResolver>,
        selection: Arc<dyn WorkItemSelection>,
        prompts: Arc<dyn BranchPromptFactory>,
        contexts: Arc<dyn ServerContextProvider>,
        associations: Arc<dyn AssociationService>,
    ) -> Self {
        Self {
            project: project.into(),
            resolver,
            selection,
            prompts,
            contexts,
            associations,
        }
    }

    /// Run the workflow once.
    ///
    /// Returns `Err` only when a server could not be reached; every other way
    /// the workflow can end is a [`BranchOutcome`].
    pub async fn create_branch(&self) -> Result<BranchOutcome, WorkItemBranchError> {
        let Some(repository) = self.resolver.resolve(&self.project) else {
            tracing::debug!(project = %self.project.display(), "No Azure DevOps git repository found");
            return Ok(BranchOutcome::NoRepository);
        };

        let work_items = self.selection.selected_work_items();
        let Some(work_item_id) = work_items.first().map(|item| item.id) else {
            tracing::debug!("No work item selected");
            return Ok(BranchOutcome::NoSelection);
        };

        let mut prompt = self.prompts.create(&repository, &work_items);
        if !prompt.show_modal_dialog().await {
            tracing::debug!("Branch creation canceled");
            return Ok(BranchOutcome::Canceled);
        }

        let Some(branch_name) = prompt.branch_name() else {
            tracing::debug!("Branch dialog confirmed without a branch name");
            return Ok(BranchOutcome::Canceled);
        };

        let context = self.contexts.context_for(&repository).await?;

        if !prompt.create_branch(&context).await? {
            tracing::warn!(branch = %branch_name, "Branch creation failed");
            return Ok(BranchOutcome::BranchCreateFailed { branch_name });
        }

        let associated = self
            .associations
            .create_work_item_branch_association(&context, &branch_name, work_item_id)
            .await?;

        if associated {
            Ok(BranchOutcome::Associated {
                branch_name,
                work_item_id,
            })
        } else {
            Ok(BranchOutcome::AssociationFailed {
                branch_name,
                work_item_id,
            })
        }
    }
}
