use std::error::Error as _;

use azure_core::{error::ErrorKind, http::StatusCode};
use azure_devops_rust_api::{core, git, wit};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::models::{
    ArtifactLink, GitRefUpdate, GitRefUpdateResult, GitRepositoryRef, LinkResult,
    TeamProjectReference, WorkItem,
};
use crate::utils::reshape;
use crate::Credential;

/// Most ids the work item endpoint accepts in one request.
pub const MAX_WORK_ITEM_BATCH: usize = 200;

/// WIQL is run at project scope; the team path segment stays empty.
const NO_TEAM: &str = "";

#[derive(Debug, Error)]
pub enum RepoClientError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Api(#[from] azure_core::Error),
    #[error("failed to convert API model: {0}")]
    Model(#[from] serde_json::Error),
    #[error("empty ref update result for {0}")]
    EmptyRefUpdate(String),
}

impl RepoClientError {
    /// HTTP status the server answered with, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(error) => http_status(error),
            _ => None,
        }
    }
}

/// Client for the work item tracking, git and core areas of one project.
#[derive(Clone)]
pub struct RepoClient {
    git: git::Client,
    wit: wit::Client,
    core: core::Client,
    organization: String,
    project: String,
}

impl std::fmt::Debug for RepoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoClient")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WiqlResult {
    #[serde(default)]
    work_items: Vec<WorkItemReference>,
}

#[derive(Deserialize)]
struct WorkItemReference {
    id: i32,
}

impl RepoClient {
    /// `api_base_url` is the server the organization (or, on Azure DevOps
    /// Server, the collection) lives under, e.g. `https://dev.azure.com`.
    pub fn new(
        api_base_url: &str,
        organization: &str,
        project: &str,
        credential: Credential,
    ) -> Result<Self, RepoClientError> {
        let endpoint = Url::parse(api_base_url.trim_end_matches('/'))
            .map_err(|e| RepoClientError::InvalidBaseUrl(format!("{api_base_url}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(RepoClientError::InvalidBaseUrl(endpoint.to_string()));
        }

        let credential = credential.into_api_credential();
        Ok(Self {
            git: git::ClientBuilder::new(credential.clone())
                .endpoint(endpoint.clone())
                .build(),
            wit: wit::ClientBuilder::new(credential.clone())
                .endpoint(endpoint.clone())
                .build(),
            core: core::ClientBuilder::new(credential)
                .endpoint(endpoint)
                .build(),
            organization: organization.to_owned(),
            project: project.to_owned(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Look up a repository of the project by name or id.
    pub async fn get_repository(
        &self,
        repo_name_or_id: &str,
    ) -> Result<GitRepositoryRef, RepoClientError> {
        let repository = self
            .git
            .repositories_client()
            .get_repository(&self.organization, repo_name_or_id, &self.project)
            .await?;

        Ok(GitRepositoryRef::try_from(repository)?)
    }

    pub async fn get_project(&self) -> Result<TeamProjectReference, RepoClientError> {
        let project = self
            .core
            .projects_client()
            .get(&self.organization, &self.project)
            .await?;

        Ok(reshape(project)?)
    }

    /// Run a WIQL query and return the matching ids in result order.
    pub async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<i32>, RepoClientError> {
        let query: wit::models::Wiql = reshape(json!({ "query": wiql }))?;
        let result = self
            .wit
            .wiql_client()
            .query_by_wiql(&self.organization, query, &self.project, NO_TEAM)
            .await?;
        let result: WiqlResult = reshape(result)?;

        Ok(result.work_items.into_iter().map(|item| item.id).collect())
    }

    /// Fetch full work items, in the order of `ids`.
    ///
    /// Requests are split into batches of [`MAX_WORK_ITEM_BATCH`].
    pub async fn get_work_items(&self, ids: &[i32]) -> Result<Vec<WorkItem>, RepoClientError> {
        let mut work_items = Vec::with_capacity(ids.len());

        for batch in ids.chunks(MAX_WORK_ITEM_BATCH) {
            let ids = batch
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let batch = self
                .wit
                .work_items_client()
                .list(&self.organization, ids, &self.project)
                .await?
                .value;

            for work_item in batch {
                work_items.push(WorkItem::try_from(work_item)?);
            }
        }

        Ok(work_items)
    }

    /// Attach `link` to a work item as an artifact relation.
    ///
    /// Client errors (400, 404) are answers, not failures: they come back as
    /// [`LinkResult::AlreadyExists`] or [`LinkResult::Rejected`].
    pub async fn add_artifact_link(
        &self,
        work_item_id: i32,
        link: &ArtifactLink,
    ) -> Result<LinkResult, RepoClientError> {
        let patch: Vec<wit::models::JsonPatchOperation> = reshape(link.to_patch_document())?;
        let updated = self
            .wit
            .work_items_client()
            .update(&self.organization, patch, work_item_id, &self.project)
            .await;

        let error = match updated {
            Ok(_) => return Ok(LinkResult::Created),
            Err(error) => error,
        };

        match http_status(&error) {
            Some(StatusCode::BadRequest | StatusCode::NotFound) => {
                let message = error_text(&error);
                if message.to_lowercase().contains("already exists") {
                    tracing::debug!(work_item_id, uri = %link.uri, "Artifact link already exists");
                    Ok(LinkResult::AlreadyExists)
                } else {
                    Ok(LinkResult::Rejected(message))
                }
            }
            _ => Err(error.into()),
        }
    }

    /// Create `branch_name` in a repository, pointing at `new_object_id`.
    pub async fn create_branch(
        &self,
        repository_id: Uuid,
        branch_name: &str,
        new_object_id: &str,
    ) -> Result<GitRefUpdateResult, RepoClientError> {
        let update = GitRefUpdate::create_branch(branch_name, new_object_id);
        let body: Vec<git::models::GitRefUpdate> = reshape([&update])?;

        let results = self
            .git
            .refs_client()
            .update_refs(
                &self.organization,
                body,
                repository_id.to_string(),
                &self.project,
            )
            .await?
            .value;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| RepoClientError::EmptyRefUpdate(update.name.clone()))?;
        Ok(reshape(result)?)
    }
}

fn http_status(error: &azure_core::Error) -> Option<StatusCode> {
    match error.kind() {
        ErrorKind::HttpResponse { status, .. } => Some(*status),
        _ => None,
    }
}

/// The error and everything it wraps; the response body sits in the source chain.
fn error_text(error: &azure_core::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
