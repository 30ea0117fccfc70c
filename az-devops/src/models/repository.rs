use azure_devops_rust_api::git::models::GitRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TeamProjectReference;
use crate::utils::reshape;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GitRepositoryRef {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    pub project: Option<TeamProjectReference>,
}

impl TryFrom<GitRepository> for GitRepositoryRef {
    type Error = serde_json::Error;

    fn try_from(repository: GitRepository) -> Result<Self, Self::Error> {
        reshape(repository)
    }
}
