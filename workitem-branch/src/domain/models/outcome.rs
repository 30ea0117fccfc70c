use std::fmt;

/// How a `create_branch` invocation ended.
///
/// Only [`BranchOutcome::Associated`] is a full success. Every other variant
/// is an expected end state, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchOutcome {
    /// The project is not inside a repository hosted by the tracking service.
    NoRepository,
    NoSelection,
    Canceled,
    BranchCreateFailed { branch_name: String },
    /// The branch exists but the server did not record the link.
    AssociationFailed { branch_name: String, work_item_id: i32 },
    Associated { branch_name: String, work_item_id: i32 },
}

impl BranchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Associated { .. })
    }
}

impl fmt::Display for BranchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRepository => write!(f, "not in an Azure DevOps git repository"),
            Self::NoSelection => write!(f, "no work item selected"),
            Self::Canceled => write!(f, "canceled"),
            Self::BranchCreateFailed { branch_name } => {
                write!(f, "could not create branch {branch_name}")
            }
            Self::AssociationFailed {
                branch_name,
                work_item_id,
            } => write!(
                f,
                "created branch {branch_name} but could not link it to work item {work_item_id}"
            ),
            Self::Associated {
                branch_name,
                work_item_id,
            } => write!(
                f,
                "created branch {branch_name} and linked it to work item {work_item_id}"
            ),
        }
    }
}
