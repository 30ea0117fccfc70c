mod display;
mod prompt;
mod server_context;
mod tracking;
mod vcs;

pub use display::{DisplayAdapter, WorkItemSelection};
pub use prompt::{BranchDialog, BranchDialogRequest, BranchDialogResult, BranchPrompt, BranchPromptFactory};
pub use server_context::ServerContextProvider;
pub use tracking::{GitHttpClient, WitHttpClient};
pub use vcs::VcsContextResolver;
