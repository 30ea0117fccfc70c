//! Hand-written port doubles with call recording.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use az_devops::ArtifactLink;
use uuid::Uuid;

use crate::{
    AssociationService, BranchPrompt, BranchPromptFactory, GitHttpClient, GitRepositoryRef,
    LinkResult, RepositoryHandle, ServerContext, ServerContextProvider, TeamProjectReference,
    VcsContextResolver, WitHttpClient, WorkItem, WorkItemBranchError, WorkItemSelection,
};

pub fn repository_handle() -> RepositoryHandle {
    RepositoryHandle {
        workdir: PathBuf::from("/work/project"),
        remote_name: "origin".to_owned(),
        remote_url: "https://dev.azure.com/contoso/Fabrikam/_git/app".to_owned(),
        head_branch: Some("main".to_owned()),
    }
}

pub fn server_context(
    repository_id: Uuid,
    project_id: Uuid,
    wit_client: Arc<dyn WitHttpClient>,
    git_client: Arc<dyn GitHttpClient>,
) -> ServerContext {
    ServerContext::new(
        GitRepositoryRef {
            id: repository_id,
            name: "app".to_owned(),
            remote_url: None,
            default_branch: None,
            project: None,
        },
        TeamProjectReference {
            id: project_id,
            name: "Fabrikam".to_owned(),
        },
        wit_client,
        git_client,
    )
}

enum LinkBehavior {
    Answer(LinkResult),
    Unreachable,
}

pub struct MockWitClient {
    link_behavior: LinkBehavior,
    query_ids: Vec<i32>,
    link_calls: Mutex<Vec<(i32, ArtifactLink)>>,
    fetched_batches: Mutex<Vec<Vec<i32>>>,
}

impl MockWitClient {
    pub fn accepting() -> Self {
        Self::with_link_result(LinkResult::Created)
    }

    pub fn with_link_result(result: LinkResult) -> Self {
        Self {
            link_behavior: LinkBehavior::Answer(result),
            query_ids: Vec::new(),
            link_calls: Mutex::new(Vec::new()),
            fetched_batches: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            link_behavior: LinkBehavior::Unreachable,
            ..Self::accepting()
        }
    }

    pub fn with_query_ids(mut self, ids: Vec<i32>) -> Self {
        self.query_ids = ids;
        self
    }

    pub fn link_calls(&self) -> Vec<(i32, ArtifactLink)> {
        self.link_calls.lock().unwrap().clone()
    }

    pub fn fetched_batches(&self) -> Vec<Vec<i32>> {
        self.fetched_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl WitHttpClient for MockWitClient {
    async fn add_artifact_link(
        &self,
        work_item_id: i32,
        link: &ArtifactLink,
    ) -> Result<LinkResult, WorkItemBranchError> {
        self.link_calls
            .lock()
            .unwrap()
            .push((work_item_id, link.clone()));
        match &self.link_behavior {
            LinkBehavior::Answer(result) => Ok(result.clone()),
            LinkBehavior::Unreachable => Err(WorkItemBranchError::transport("connection refused")),
        }
    }

    async fn query_work_item_ids(&self, _wiql: &str) -> Result<Vec<i32>, WorkItemBranchError> {
        Ok(self.query_ids.clone())
    }

    async fn get_work_items(&self, ids: &[i32]) -> Result<Vec<WorkItem>, WorkItemBranchError> {
        self.fetched_batches.lock().unwrap().push(ids.to_vec());
        Ok(ids.iter().copied().map(WorkItem::new).collect())
    }
}

pub struct MockGitClient {
    answer: Option<bool>,
    calls: Mutex<Vec<(Uuid, String, String)>>,
}

impl MockGitClient {
    pub fn succeeding() -> Self {
        Self::answering(Some(true))
    }

    pub fn rejecting() -> Self {
        Self::answering(Some(false))
    }

    pub fn unreachable() -> Self {
        Self::answering(None)
    }

    fn answering(answer: Option<bool>) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Uuid, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHttpClient for MockGitClient {
    async fn create_branch(
        &self,
        repository_id: Uuid,
        branch_name: &str,
        new_object_id: &str,
    ) -> Result<bool, WorkItemBranchError> {
        self.calls.lock().unwrap().push((
            repository_id,
            branch_name.to_owned(),
            new_object_id.to_owned(),
        ));
        self.answer
            .ok_or_else(|| WorkItemBranchError::transport("connection refused"))
    }
}

pub struct MockVcsResolver {
    handle: Option<RepositoryHandle>,
    call_count: AtomicUsize,
}

impl MockVcsResolver {
    pub fn returning(handle: Option<RepositoryHandle>) -> Self {
        Self {
            handle,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl VcsContextResolver for MockVcsResolver {
    fn resolve(&self, _project: &Path) -> Option<RepositoryHandle> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.handle.clone()
    }
}

pub struct MockSelection {
    work_items: Vec<WorkItem>,
    call_count: AtomicUsize,
}

impl MockSelection {
    pub fn returning(work_items: Vec<WorkItem>) -> Self {
        Self {
            work_items,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl WorkItemSelection for MockSelection {
    fn selected_work_items(&self) -> Vec<WorkItem> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.work_items.clone()
    }
}

/// Per-method call counters shared by every prompt a factory hands out.
#[derive(Default)]
pub struct PromptCalls {
    show_modal_dialog: AtomicUsize,
    branch_name: AtomicUsize,
    create_branch: AtomicUsize,
}

impl PromptCalls {
    pub fn show_modal_dialog(&self) -> usize {
        self.show_modal_dialog.load(Ordering::SeqCst)
    }

    pub fn branch_name(&self) -> usize {
        self.branch_name.load(Ordering::SeqCst)
    }

    pub fn create_branch(&self) -> usize {
        self.create_branch.load(Ordering::SeqCst)
    }
}

pub struct MockPrompt {
    confirm: bool,
    branch_name: Option<String>,
    create_ok: bool,
    create_unreachable: bool,
    calls: Arc<PromptCalls>,
}

#[async_trait]
impl BranchPrompt for MockPrompt {
    async fn show_modal_dialog(&mut self) -> bool {
        self.calls.show_modal_dialog.fetch_add(1, Ordering::SeqCst);
        self.confirm
    }

    fn branch_name(&self) -> Option<String> {
        self.calls.branch_name.fetch_add(1, Ordering::SeqCst);
        self.branch_name.clone()
    }

    async fn create_branch(
        &mut self,
        _context: &ServerContext,
    ) -> Result<bool, WorkItemBranchError> {
        self.calls.create_branch.fetch_add(1, Ordering::SeqCst);
        if self.create_unreachable {
            return Err(WorkItemBranchError::transport("connection refused"));
        }
        Ok(self.create_ok)
    }
}

pub struct MockPromptFactory {
    confirm: bool,
    branch_name: Option<String>,
    create_ok: bool,
    create_unreachable: bool,
    calls: Arc<PromptCalls>,
    created: AtomicUsize,
    last_work_item_ids: Mutex<Vec<i32>>,
}

impl MockPromptFactory {
    pub fn new(confirm: bool, branch_name: Option<&str>, create_ok: bool) -> Self {
        Self {
            confirm,
            branch_name: branch_name.map(str::to_owned),
            create_ok,
            create_unreachable: false,
            calls: Arc::new(PromptCalls::default()),
            created: AtomicUsize::new(0),
            last_work_item_ids: Mutex::new(Vec::new()),
        }
    }

    /// Confirms `branch_name`, then cannot reach the server to create it.
    pub fn unreachable_on_create(branch_name: &str) -> Self {
        Self {
            create_unreachable: true,
            ..Self::new(true, Some(branch_name), false)
        }
    }

    pub fn calls(&self) -> Arc<PromptCalls> {
        self.calls.clone()
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn last_work_item_ids(&self) -> Vec<i32> {
        self.last_work_item_ids.lock().unwrap().clone()
    }
}

impl BranchPromptFactory for MockPromptFactory {
    fn create(
        &self,
        _repository: &RepositoryHandle,
        work_items: &[WorkItem],
    ) -> Box<dyn BranchPrompt> {
        self.created.fetch_add(1, Ordering::SeqCst);
        *self.last_work_item_ids.lock().unwrap() = work_items.iter().map(|w| w.id).collect();
        Box::new(MockPrompt {
            confirm: self.confirm,
            branch_name: self.branch_name.clone(),
            create_ok: self.create_ok,
            create_unreachable: self.create_unreachable,
            calls: self.calls.clone(),
        })
    }
}

#[derive(Default)]
pub struct MockContextProvider {
    call_count: AtomicUsize,
    git_client: Option<Arc<dyn GitHttpClient>>,
}

impl MockContextProvider {
    /// Contexts whose git client is `git_client` instead of one that always succeeds.
    pub fn with_git_client(git_client: Arc<dyn GitHttpClient>) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            git_client: Some(git_client),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServerContextProvider for MockContextProvider {
    async fn context_for(
        &self,
        _repository: &RepositoryHandle,
    ) -> Result<ServerContext, WorkItemBranchError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let git_client = self
            .git_client
            .clone()
            .unwrap_or_else(|| Arc::new(MockGitClient::succeeding()));
        Ok(server_context(
            Uuid::nil(),
            Uuid::nil(),
            Arc::new(MockWitClient::accepting()),
            git_client,
        ))
    }
}

pub struct MockAssociationService {
    answer: Option<bool>,
    calls: Mutex<Vec<(String, i32)>>,
}

impl MockAssociationService {
    pub fn returning(answer: bool) -> Self {
        Self {
            answer: Some(answer),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, i32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssociationService for MockAssociationService {
    async fn create_work_item_branch_association(
        &self,
        _context: &ServerContext,
        branch_name: &str,
        work_item_id: i32,
    ) -> Result<bool, WorkItemBranchError> {
        self.calls
            .lock()
            .unwrap()
            .push((branch_name.to_owned(), work_item_id));
        self.answer
            .ok_or_else(|| WorkItemBranchError::transport("connection refused"))
    }
}
