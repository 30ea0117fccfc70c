use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Relation type the tracking service uses for links to external artifacts.
pub const ARTIFACT_LINK_REL: &str = "ArtifactLink";

/// Link name shown for git branch artifacts.
pub const BRANCH_LINK_NAME: &str = "Branch";

/// A link from a work item to an external artifact, addressed by a `vstfs` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactLink {
    pub uri: String,
    pub name: String,
}

impl ArtifactLink {
    /// Link to a git branch in the given project and repository.
    ///
    /// The URI has the form
    /// `vstfs:///Git/Ref/{project}%2F{repository}%2FGB{branch}` where the
    /// branch is url-encoded and any `refs/heads/` prefix is dropped first.
    pub fn git_branch(project_id: Uuid, repository_id: Uuid, branch_name: &str) -> Self {
        let branch = branch_name
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or(branch_name);

        Self {
            uri: format!(
                "vstfs:///Git/Ref/{}%2F{}%2FGB{}",
                project_id,
                repository_id,
                urlencoding::encode(branch)
            ),
            name: BRANCH_LINK_NAME.to_owned(),
        }
    }

    /// JSON patch document adding this link as a relation.
    pub(crate) fn to_patch_document(&self) -> Vec<PatchOperation> {
        vec![PatchOperation {
            op: "add",
            path: "/relations/-",
            value: json!({
                "rel": ARTIFACT_LINK_REL,
                "url": self.uri,
                "attributes": { "name": self.name },
            }),
        }]
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PatchOperation {
    pub op: &'static str,
    pub path: &'static str,
    pub value: serde_json::Value,
}

/// How the tracking service answered a link request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkResult {
    Created,
    AlreadyExists,
    /// The service refused the request for a recoverable reason, e.g. an unknown work item id.
    Rejected(String),
}

impl LinkResult {
    /// True when the link exists on the server after the call.
    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Created | Self::AlreadyExists)
    }
}
