use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use az_devops::{Credential, RepoClient};
use workitem_branch::adapters::outbound::azure_devops::{
    AzureDevOpsClient, AzureDevOpsContextProvider, AzureRemote,
};
use workitem_branch::adapters::outbound::git::{CreateBranchControllerFactory, GitVcsResolver};
use workitem_branch::{
    BranchOutcome, ResultAccumulator, ResultPage, VcsContextResolver, VcsWorkItemsModel,
    WitAssociationService, WitHttpClient, WorkItemLookup, WorkflowCollaborators,
};

use crate::config::WibConfig;
use crate::dialog::TerminalDialog;
use crate::table::{format_row, TerminalTable};

/// Where to send work item queries.
struct Target {
    api_url: String,
    organization: String,
    project: String,
}

/// Organization and project to query: config first, then the repository's remote.
///
/// An Azure DevOps Server remote also names the server, unless the
/// organization was configured explicitly.
fn target_project(config: &WibConfig, project_dir: &Path) -> Result<Target> {
    let remote = GitVcsResolver::new()
        .resolve(project_dir)
        .and_then(|repository| AzureRemote::parse(&repository.remote_url));

    let api_url = match (&config.organization, &remote) {
        (None, Some(remote)) => remote.api_base_url(&config.api_url).to_owned(),
        _ => config.api_url.clone(),
    };
    let organization = config
        .organization
        .clone()
        .or_else(|| remote.as_ref().map(|r| r.organization.clone()))
        .context("No organization configured and no Azure DevOps remote found (set ADO_ORGANIZATION)")?;
    let project = config
        .project
        .clone()
        .or_else(|| remote.as_ref().map(|r| r.project.clone()))
        .context("No project configured and no Azure DevOps remote found (set ADO_PROJECT)")?;

    Ok(Target {
        api_url,
        organization,
        project,
    })
}

fn credential() -> Result<Credential> {
    az_devops::get_credential().context("ADO_TOKEN is not set")
}

fn tracking_client(config: &WibConfig, project_dir: &Path) -> Result<Arc<AzureDevOpsClient>> {
    let target = target_project(config, project_dir)?;
    let client = RepoClient::new(
        &target.api_url,
        &target.organization,
        &target.project,
        credential()?,
    )
        .map_err(|e| anyhow::anyhow!("Error creating repo client: {}", e))?;
    Ok(Arc::new(AzureDevOpsClient::new(client)))
}

pub async fn list(config: &WibConfig, project_dir: &Path, query: Option<String>) -> Result<()> {
    let client = tracking_client(config, project_dir)?;
    let accumulator = Arc::new(ResultAccumulator::new());
    let _table = TerminalTable::attach(accumulator.clone());

    let wiql = query.unwrap_or_else(|| config.default_query.clone());
    let count = WorkItemLookup::new(client, wiql)
        .load_into(&accumulator)
        .await
        .context("Error getting work items")?;

    if count == 0 {
        println!("No work items found");
    }
    Ok(())
}

pub async fn branch(
    config: &WibConfig,
    project_dir: &Path,
    ids: &[i32],
    checkout: bool,
) -> Result<BranchOutcome> {
    let client = tracking_client(config, project_dir)?;

    let model = VcsWorkItemsModel::new(
        project_dir,
        WorkflowCollaborators {
            resolver: Arc::new(GitVcsResolver::new()),
            prompts: Arc::new(CreateBranchControllerFactory::new(
                Arc::new(TerminalDialog::stdio()),
                checkout,
            )),
            contexts: Arc::new(AzureDevOpsContextProvider::new(
                config.api_url.clone(),
                credential()?,
            )),
            associations: Arc::new(WitAssociationService::new()),
        },
    );

    let mut work_items = client
        .get_work_items(ids)
        .await
        .context("Error getting work items")?;
    for id in ids {
        if !work_items.iter().any(|item| item.id == *id) {
            tracing::warn!(work_item_id = *id, "Work item not found");
        }
    }
    // Rows follow the command line, so the first id is the one that gets linked.
    work_items.sort_by_key(|item| ids.iter().position(|id| *id == item.id));

    model.clear_data();
    model.append_data(ResultPage::new(work_items));
    let view = model.model_for_view();
    let rows = (0..view.row_count()).collect::<Vec<_>>();
    view.select_rows(&rows)
        .context("Error selecting work items")?;

    for (row, work_item) in view.rows().iter().enumerate() {
        println!("{}", format_row(row, work_item));
    }

    model
        .create_branch()
        .await
        .context("Error creating branch")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository_with_origin(url: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        repo.remote("origin", url).unwrap();
        dir
    }

    #[test]
    fn azure_devops_server_remote_names_the_server() {
        let dir = repository_with_origin(
            "https://tfs.contoso.com/tfs/DefaultCollection/Fabrikam/_git/app",
        );

        let target = target_project(&WibConfig::default(), dir.path()).unwrap();

        assert_eq!(target.api_url, "https://tfs.contoso.com/tfs");
        assert_eq!(target.organization, "DefaultCollection");
        assert_eq!(target.project, "Fabrikam");
    }

    #[test]
    fn configured_organization_keeps_configured_server() {
        let dir = repository_with_origin(
            "https://tfs.contoso.com/tfs/DefaultCollection/Fabrikam/_git/app",
        );
        let config = WibConfig {
            organization: Some("contoso".to_owned()),
            ..WibConfig::default()
        };

        let target = target_project(&config, dir.path()).unwrap();

        assert_eq!(target.api_url, config.api_url);
        assert_eq!(target.organization, "contoso");
        assert_eq!(target.project, "Fabrikam");
    }
}
