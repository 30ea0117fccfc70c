use std::sync::Arc;

use super::WorkItem;

/// Position in a lookup's id list where the next page starts.
///
/// Opaque outside the lookup that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuationToken {
    pub(crate) ids: Arc<[i32]>,
    pub(crate) offset: usize,
}

/// Work items produced by one lookup call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultPage {
    pub work_items: Vec<WorkItem>,
    pub continuation: Option<ContinuationToken>,
}

impl ResultPage {
    pub fn new(work_items: Vec<WorkItem>) -> Self {
        Self {
            work_items,
            continuation: None,
        }
    }

    pub fn len(&self) -> usize {
        self.work_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.work_items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

impl From<Vec<WorkItem>> for ResultPage {
    fn from(work_items: Vec<WorkItem>) -> Self {
        Self::new(work_items)
    }
}
