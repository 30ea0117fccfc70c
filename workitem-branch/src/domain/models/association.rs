use az_devops::ArtifactLink;
use uuid::Uuid;

use super::ServerContext;

/// One branch ↔ work item link, built for a single association call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchAssociation {
    pub repository_id: Uuid,
    pub project_id: Uuid,
    pub work_item_id: i32,
    pub branch_ref: String,
}

impl BranchAssociation {
    pub fn new(context: &ServerContext, branch_ref: &str, work_item_id: i32) -> Self {
        Self {
            repository_id: context.git_repository().id,
            project_id: context.team_project_reference().id,
            work_item_id,
            branch_ref: branch_ref.to_owned(),
        }
    }

    pub fn artifact_link(&self) -> ArtifactLink {
        ArtifactLink::git_branch(self.project_id, self.repository_id, &self.branch_ref)
    }
}
