const HOSTED_HOST: &str = "dev.azure.com";
const LEGACY_HOSTED_SUFFIX: &str = ".visualstudio.com";
const DEFAULT_COLLECTION: &str = "DefaultCollection";

/// Organization, project and repository named by an Azure DevOps git remote URL.
///
/// For Azure DevOps Server (TFS) remotes `organization` is the collection and
/// `server_url` is where that collection is served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AzureRemote {
    pub organization: String,
    pub project: String,
    pub repository: String,
    /// `None` for the hosted service.
    pub server_url: Option<String>,
}

impl AzureRemote {
    /// Parse the remote URL forms Azure DevOps hands out:
    ///
    /// - `https://[user@]dev.azure.com/{org}/{project}/_git/{repo}`
    /// - `https://{org}.visualstudio.com/[DefaultCollection/]{project}/_git/{repo}`
    /// - `git@ssh.dev.azure.com:v3/{org}/{project}/{repo}`
    /// - `{org}@vs-ssh.visualstudio.com:v3/{org}/{project}/{repo}`
    /// - `https://{server}[/{path}]/{collection}/{project}/_git/{repo}` (Azure DevOps Server)
    /// - `ssh://{server}[:{port}][/{path}]/{collection}/{project}/_git/{repo}`
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim().trim_end_matches('/');

        if let Some((_, path)) = url.split_once(":v3/") {
            let mut parts = path.split('/');
            let (org, project, repo) = (parts.next()?, parts.next()?, parts.next()?);
            return Self::from_parts(org, project, repo, None);
        }

        let (scheme, without_scheme) = url.split_once("://")?;
        let (authority, path) = without_scheme.split_once('/')?;
        let host_port = authority.rsplit('@').next()?;
        let host = host_port
            .split(':')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let segments = path.split('/').collect::<Vec<_>>();
        let git_index = segments.iter().position(|segment| *segment == "_git")?;
        let repo = segments.get(git_index + 1)?;
        let project = git_index.checked_sub(1).and_then(|i| segments.get(i))?;

        if host == HOSTED_HOST {
            let org = segments.first()?;
            // Repositories named after their project may omit the project segment.
            if git_index == 1 {
                return Self::from_parts(org, repo, repo, None);
            }
            return Self::from_parts(org, project, repo, None);
        }

        if let Some(org) = host.strip_suffix(LEGACY_HOSTED_SUFFIX) {
            if *project == DEFAULT_COLLECTION {
                return Self::from_parts(org, repo, repo, None);
            }
            return Self::from_parts(org, project, repo, None);
        }

        let server_authority = match scheme {
            "http" | "https" => host_port.to_owned(),
            // The REST API is not served on the ssh port.
            "ssh" => host.clone(),
            _ => return None,
        };
        let server_scheme = if scheme == "http" { "http" } else { "https" };

        // `{collection}/_git/{repo}`: a repository named after its project.
        let (collection_index, project) = if git_index >= 2 {
            (git_index - 2, *project)
        } else {
            (0, *repo)
        };
        let collection = segments.get(collection_index)?;
        let server_path = segments[..collection_index].join("/");
        let server_url = if server_path.is_empty() {
            format!("{server_scheme}://{server_authority}")
        } else {
            format!("{server_scheme}://{server_authority}/{server_path}")
        };

        Self::from_parts(collection, project, repo, Some(server_url))
    }

    /// Server to send API requests to, falling back to `hosted_url` for the hosted service.
    pub fn api_base_url<'a>(&'a self, hosted_url: &'a str) -> &'a str {
        self.server_url.as_deref().unwrap_or(hosted_url)
    }

    fn from_parts(
        organization: &str,
        project: &str,
        repository: &str,
        server_url: Option<String>,
    ) -> Option<Self> {
        let decode = |s: &str| {
            urlencoding::decode(s)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| s.to_owned())
        };
        let repository = repository.strip_suffix(".git").unwrap_or(repository);

        if organization.is_empty() || project.is_empty() || repository.is_empty() {
            return None;
        }

        Some(Self {
            organization: decode(organization),
            project: decode(project),
            repository: decode(repository),
            server_url,
        })
    }
}

/// True when `url` points at a git repository hosted by Azure DevOps or Azure DevOps Server.
pub fn is_azure_devops_remote(url: &str) -> bool {
    AzureRemote::parse(url).is_some()
}
