use std::path::Path;

use crate::domain::models::RepositoryHandle;

/// Finds the tracking-service-backed repository a project lives in.
pub trait VcsContextResolver: Send + Sync + 'static {
    /// `None` when `project` is not inside such a repository.
    fn resolve(&self, project: &Path) -> Option<RepositoryHandle>;
}
