use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{
    models::{BranchOutcome, ResultPage},
    ports::{AssociationService, BranchPromptFactory, ServerContextProvider, VcsContextResolver},
    WorkItemBranchError,
};

use super::{BranchCreationOrchestrator, ResultAccumulator, WorkItemsTableModel};

/// The collaborators a work item session needs from its host.
pub struct WorkflowCollaborators {
    pub resolver: Arc<dyn VcsContextResolver>,
    pub prompts: Arc<dyn BranchPromptFactory>,
    pub contexts: Arc<dyn ServerContextProvider>,
    pub associations: Arc<dyn AssociationService>,
}

/// A work item browsing session: the fetched rows, the view over them, and
/// the branch workflow acting on the view's selection.
pub struct VcsWorkItemsModel {
    accumulator: Arc<ResultAccumulator>,
    table_model: Arc<WorkItemsTableModel>,
    orchestrator: BranchCreationOrchestrator,
}

impl VcsWorkItemsModel {
    pub fn new(project: impl Into<PathBuf>, collaborators: WorkflowCollaborators) -> Self {
        let accumulator = Arc::new(ResultAccumulator::new());
        let table_model = WorkItemsTableModel::bound_to(accumulator.clone());
        let orchestrator = BranchCreationOrchestrator::new(
            project,
            collaborators.resolver,
            table_model.clone(),
            collaborators.prompts,
            collaborators.contexts,
            collaborators.associations,
        );

        Self {
            accumulator,
            table_model,
            orchestrator,
        }
    }

    pub fn append_data(&self, page: ResultPage) {
        self.accumulator.append(page);
    }

    pub fn clear_data(&self) {
        self.accumulator.clear();
    }

    pub fn model_for_view(&self) -> &Arc<WorkItemsTableModel> {
        &self.table_model
    }

    /// The accumulator, for lookups that load pages into it directly.
    pub fn accumulator(&self) -> &Arc<ResultAccumulator> {
        &self.accumulator
    }

    pub async fn create_branch(&self) -> Result<BranchOutcome, WorkItemBranchError> {
        self.orchestrator.create_branch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{
        repository_handle, MockAssociationService, MockContextProvider, MockPromptFactory,
        MockVcsResolver,
    };
    use crate::WorkItem;

    fn create_results(number_of_items: i32, starting_index: i32) -> ResultPage {
        ResultPage::new(
            (starting_index..starting_index + number_of_items)
                .map(WorkItem::new)
                .collect(),
        )
    }

    fn model(
        prompts: Arc<MockPromptFactory>,
        associations: Arc<MockAssociationService>,
    ) -> VcsWorkItemsModel {
        VcsWorkItemsModel::new(
            "/work/project",
            WorkflowCollaborators {
                resolver: Arc::new(MockVcsResolver::returning(Some(repository_handle()))),
                prompts,
                contexts: Arc::new(MockContextProvider::default()),
                associations,
            },
        )
    }

    fn default_model() -> VcsWorkItemsModel {
        model(
            Arc::new(MockPromptFactory::new(true, Some("branchName"), true)),
            Arc::new(MockAssociationService::returning(true)),
        )
    }

    #[test]
    fn append_data() {
        let model = default_model();

        model.append_data(create_results(5, 0));
        assert_eq!(model.model_for_view().row_count(), 5);
        for i in 0..5 {
            assert_eq!(model.model_for_view().work_item(i).unwrap().id, i as i32);
        }

        model.append_data(create_results(5, 5));
        assert_eq!(model.model_for_view().row_count(), 10);
        for i in 0..10 {
            assert_eq!(model.model_for_view().work_item(i).unwrap().id, i as i32);
        }
    }

    #[test]
    fn clear_data() {
        let model = default_model();

        model.append_data(create_results(5, 0));
        assert_eq!(model.model_for_view().row_count(), 5);
        model.clear_data();
        assert_eq!(model.model_for_view().row_count(), 0);
    }

    #[tokio::test]
    async fn create_branch_uses_view_selection() {
        let prompts = Arc::new(MockPromptFactory::new(true, Some("branchName"), true));
        let associations = Arc::new(MockAssociationService::returning(true));
        let model = model(prompts.clone(), associations.clone());
        model.append_data(create_results(5, 0));
        model.model_for_view().select_rows(&[3]).unwrap();

        let outcome = model.create_branch().await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(associations.calls(), vec![("branchName".to_owned(), 3)]);
        assert_eq!(prompts.calls().create_branch(), 1);
    }

    #[tokio::test]
    async fn failed_branch_creation_leaves_rows_untouched() {
        let prompts = Arc::new(MockPromptFactory::new(true, Some("branchName"), false));
        let associations = Arc::new(MockAssociationService::returning(true));
        let model = model(prompts, associations.clone());
        model.append_data(create_results(5, 0));
        model.model_for_view().select_rows(&[0]).unwrap();

        let outcome = model.create_branch().await.unwrap();

        assert!(!outcome.is_success());
        assert_eq!(model.model_for_view().row_count(), 5);
        assert_eq!(model.model_for_view().selected_rows(), vec![0]);
        assert!(associations.calls().is_empty());
    }

    #[tokio::test]
    async fn create_branch_without_selection_is_noop() {
        let prompts = Arc::new(MockPromptFactory::new(true, Some("branchName"), true));
        let model = model(prompts.clone(), Arc::new(MockAssociationService::returning(true)));
        model.append_data(create_results(2, 0));

        let outcome = model.create_branch().await.unwrap();

        assert_eq!(outcome, BranchOutcome::NoSelection);
        assert_eq!(prompts.created(), 0);
    }
}
