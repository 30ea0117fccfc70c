use async_trait::async_trait;

use crate::domain::{
    models::{RepositoryHandle, ServerContext, WorkItem},
    WorkItemBranchError,
};

/// The branch-creation step: ask the user, then create the branch.
///
/// One prompt serves one `create_branch` invocation.
#[async_trait]
pub trait BranchPrompt: Send {
    /// Show the prompt and block until the user confirms (`true`) or cancels.
    async fn show_modal_dialog(&mut self) -> bool;

    /// The confirmed branch name.
    fn branch_name(&self) -> Option<String>;

    /// Create the confirmed branch.
    ///
    /// `Ok(false)` when the branch could not be created, e.g. the server
    /// refused the ref update; `Err` when the server could not be reached.
    async fn create_branch(&mut self, context: &ServerContext)
        -> Result<bool, WorkItemBranchError>;
}

pub trait BranchPromptFactory: Send + Sync + 'static {
    fn create(&self, repository: &RepositoryHandle, work_items: &[WorkItem])
        -> Box<dyn BranchPrompt>;
}

/// What the branch dialog is opened with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchDialogRequest {
    pub suggested_name: String,
    pub source_ref: String,
    pub work_item_ids: Vec<i32>,
    pub checkout: bool,
}

/// What the user confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchDialogResult {
    pub branch_name: String,
    pub source_ref: String,
    pub checkout: bool,
}

/// The user-facing half of a branch prompt.
pub trait BranchDialog: Send + Sync + 'static {
    /// Blocks until the user answers. `None` means canceled.
    fn show(&self, request: &BranchDialogRequest) -> Option<BranchDialogResult>;
}
