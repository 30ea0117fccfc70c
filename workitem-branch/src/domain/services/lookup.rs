use std::sync::Arc;

use crate::domain::{
    models::{ContinuationToken, ResultPage},
    ports::WitHttpClient,
    WorkItemBranchError,
};

use super::ResultAccumulator;

/// Largest page the tracking service returns in one work item request.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Runs a WIQL query and fetches the matching work items page by page.
pub struct WorkItemLookup {
    client: Arc<dyn WitHttpClient>,
    wiql: String,
    page_size: usize,
}

impl WorkItemLookup {
    pub fn new(client: Arc<dyn WitHttpClient>, wiql: impl Into<String>) -> Self {
        Self {
            client,
            wiql: wiql.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Run the query and fetch the first page.
    pub async fn first_page(&self) -> Result<ResultPage, WorkItemBranchError> {
        let ids: Arc<[i32]> = self.client.query_work_item_ids(&self.wiql).await?.into();
        tracing::debug!(matches = ids.len(), "Work item query returned ids");

        self.fetch(ContinuationToken { ids, offset: 0 }).await
    }

    /// Fetch the page a previous page's continuation token points at.
    pub async fn next_page(
        &self,
        token: &ContinuationToken,
    ) -> Result<ResultPage, WorkItemBranchError> {
        self.fetch(token.clone()).await
    }

    /// Replace the accumulator's contents with every page of the query.
    ///
    /// Returns the number of rows loaded.
    pub async fn load_into(
        &self,
        accumulator: &ResultAccumulator,
    ) -> Result<usize, WorkItemBranchError> {
        accumulator.clear();

        let mut page = self.first_page().await?;
        loop {
            let continuation = page.continuation.take();
            accumulator.append(page);

            match continuation {
                Some(token) => page = self.next_page(&token).await?,
                None => break,
            }
        }

        Ok(accumulator.size())
    }

    async fn fetch(&self, token: ContinuationToken) -> Result<ResultPage, WorkItemBranchError> {
        let start = token.offset.min(token.ids.len());
        let end = (start + self.page_size).min(token.ids.len());

        let work_items = if start == end {
            Vec::new()
        } else {
            self.client.get_work_items(&token.ids[start..end]).await?
        };

        let continuation = (end < token.ids.len()).then(|| ContinuationToken {
            ids: token.ids.clone(),
            offset: end,
        });

        Ok(ResultPage {
            work_items,
            continuation,
        })
    }
}
