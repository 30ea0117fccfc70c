use std::path::PathBuf;
use std::sync::Arc;

use super::{GitRepositoryRef, TeamProjectReference};
use crate::domain::ports::{GitHttpClient, WitHttpClient};

/// A local git repository that is backed by the tracking service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryHandle {
    pub workdir: PathBuf,
    pub remote_name: String,
    pub remote_url: String,
    /// Short name of the checked out branch, `None` when HEAD is detached or unborn.
    pub head_branch: Option<String>,
}

/// Server-side identity of the current repository plus the API clients to reach it.
#[derive(Clone)]
pub struct ServerContext {
    repository: GitRepositoryRef,
    team_project: TeamProjectReference,
    wit_client: Arc<dyn WitHttpClient>,
    git_client: Arc<dyn GitHttpClient>,
}

impl ServerContext {
    pub fn new(
        repository: GitRepositoryRef,
        team_project: TeamProjectReference,
        wit_client: Arc<dyn WitHttpClient>,
        git_client: Arc<dyn GitHttpClient>,
    ) -> Self {
        Self {
            repository,
            team_project,
            wit_client,
            git_client,
        }
    }

    pub fn git_repository(&self) -> &GitRepositoryRef {
        &self.repository
    }

    pub fn team_project_reference(&self) -> &TeamProjectReference {
        &self.team_project
    }

    pub fn wit_http_client(&self) -> &Arc<dyn WitHttpClient> {
        &self.wit_client
    }

    pub fn git_http_client(&self) -> &Arc<dyn GitHttpClient> {
        &self.git_client
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("repository", &self.repository.name)
            .field("team_project", &self.team_project.name)
            .finish_non_exhaustive()
    }
}
