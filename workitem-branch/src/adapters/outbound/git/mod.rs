mod branch_controller;

pub use branch_controller::{CreateBranchController, CreateBranchControllerFactory};

use std::path::Path;

use git2::{build::CheckoutBuilder, BranchType, Oid, Repository};

use crate::adapters::outbound::azure_devops::is_azure_devops_remote;
use crate::domain::{models::RepositoryHandle, ports::VcsContextResolver};

const PREFERRED_REMOTE: &str = "origin";

/// Resolves the enclosing git repository, if one of its remotes is hosted on Azure DevOps.
#[derive(Clone, Copy, Debug, Default)]
pub struct GitVcsResolver;

impl GitVcsResolver {
    pub fn new() -> Self {
        Self
    }
}

impl VcsContextResolver for GitVcsResolver {
    fn resolve(&self, project: &Path) -> Option<RepositoryHandle> {
        let repo = match Repository::discover(project) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::debug!(path = %project.display(), error = %e, "No git repository found");
                return None;
            }
        };

        let workdir = repo.workdir()?.to_path_buf();
        let (remote_name, remote_url) = azure_devops_remote(&repo)?;
        let head_branch = repo
            .head()
            .ok()
            .filter(|head| head.is_branch())
            .and_then(|head| head.shorthand().map(str::to_owned));

        Some(RepositoryHandle {
            workdir,
            remote_name,
            remote_url,
            head_branch,
        })
    }
}

/// First Azure DevOps remote, preferring `origin`.
fn azure_devops_remote(repo: &Repository) -> Option<(String, String)> {
    let remotes = repo.remotes().ok()?;
    let mut names = remotes.iter().flatten().collect::<Vec<_>>();
    names.sort_by_key(|name| *name != PREFERRED_REMOTE);

    names.into_iter().find_map(|name| {
        let remote = repo.find_remote(name).ok()?;
        let url = remote.url()?;
        is_azure_devops_remote(url).then(|| (name.to_owned(), url.to_owned()))
    })
}

/// Ref a new branch starts from by default: the remote-tracking branch of
/// HEAD when the remote has it, otherwise HEAD itself.
pub fn default_source_ref(repository: &RepositoryHandle) -> String {
    let Some(head) = repository.head_branch.as_deref() else {
        return "HEAD".to_owned();
    };

    let tracking = format!("{}/{}", repository.remote_name, head);
    let has_tracking = Repository::open(&repository.workdir)
        .map(|repo| repo.find_branch(&tracking, BranchType::Remote).is_ok())
        .unwrap_or(false);

    if has_tracking {
        tracking
    } else {
        "HEAD".to_owned()
    }
}

/// Commit id `spec` points at, as a hex string.
pub fn resolve_commit(workdir: &Path, spec: &str) -> Result<String, git2::Error> {
    let repo = Repository::open(workdir)?;
    let commit = repo.revparse_single(spec)?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// Create a local branch at `commit_id`, optionally switching to it.
pub fn create_local_branch(
    workdir: &Path,
    branch_name: &str,
    commit_id: &str,
    checkout: bool,
) -> Result<(), git2::Error> {
    let repo = Repository::open(workdir)?;
    let commit = repo.find_commit(Oid::from_str(commit_id)?)?;
    repo.branch(branch_name, &commit, false)?;

    if checkout {
        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().safe()))?;
        repo.set_head(&format!("refs/heads/{branch_name}"))?;
    }
    Ok(())
}

/// Whether git accepts `branch_name` as a branch name.
pub fn is_valid_branch_name(branch_name: &str) -> bool {
    git2::Branch::name_is_valid(branch_name).unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod test_repo {
    use std::path::Path;

    use git2::{Oid, Repository, Signature};

    /// A repository with one empty commit and, optionally, an `origin` remote.
    pub fn init(dir: &Path, origin: Option<&str>) -> (Repository, Oid) {
        let repo = Repository::init(dir).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let commit_id = {
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
                .unwrap()
        };
        if let Some(url) = origin {
            repo.remote("origin", url).unwrap();
        }
        (repo, commit_id)
    }
}
