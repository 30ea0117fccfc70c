mod association;
mod branch_name;
mod outcome;
mod result_page;
mod server_context;

pub use association::BranchAssociation;
pub use az_devops::{GitRepositoryRef, LinkResult, TeamProjectReference, WorkItem};
pub use branch_name::suggested_branch_name;
pub use outcome::BranchOutcome;
pub use result_page::{ContinuationToken, ResultPage};
pub use server_context::{RepositoryHandle, ServerContext};
