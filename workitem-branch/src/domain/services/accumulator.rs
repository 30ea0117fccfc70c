use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::domain::{
    models::{ResultPage, WorkItem},
    ports::DisplayAdapter,
    OutOfRangeError,
};

/// Ordered set of every work item fetched for the current query.
///
/// Row `i` is the `i`-th item in append order. Duplicates are kept: appending
/// the same id twice yields two rows. A page is appended under a single write
/// lock, so readers see either none or all of it.
#[derive(Default)]
pub struct ResultAccumulator {
    rows: RwLock<Vec<WorkItem>>,
    adapters: RwLock<Vec<Weak<dyn DisplayAdapter>>>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display adapter for change notifications.
    ///
    /// Only a weak reference is kept, so an adapter that owns this accumulator
    /// does not keep itself alive.
    pub fn bind(&self, adapter: Weak<dyn DisplayAdapter>) {
        let mut adapters = self
            .adapters
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        adapters.retain(|existing| existing.strong_count() > 0);
        adapters.push(adapter);
    }

    pub fn append(&self, page: ResultPage) {
        if page.is_empty() {
            return;
        }

        let count = page.len();
        let first_row = {
            let mut rows = self.write_rows();
            let first_row = rows.len();
            rows.extend(page.work_items);
            first_row
        };

        tracing::trace!(first_row, count, "Appended result page");
        self.notify(|adapter| adapter.notify_rows_added(first_row, count));
    }

    pub fn clear(&self) {
        self.write_rows().clear();
        self.notify(|adapter| adapter.notify_reset());
    }

    pub fn get(&self, index: usize) -> Result<WorkItem, OutOfRangeError> {
        let rows = self.read_rows();
        rows.get(index).cloned().ok_or(OutOfRangeError {
            index,
            len: rows.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.read_rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Copy of the rows at this moment.
    pub fn snapshot(&self) -> Vec<WorkItem> {
        self.read_rows().clone()
    }

    fn notify(&self, f: impl Fn(&dyn DisplayAdapter)) {
        let adapters = self
            .adapters
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter_map(Weak::upgrade)
            .collect::<Vec<_>>();

        for adapter in adapters {
            f(adapter.as_ref());
        }
    }

    fn read_rows(&self) -> RwLockReadGuard<'_, Vec<WorkItem>> {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_rows(&self) -> RwLockWriteGuard<'_, Vec<WorkItem>> {
        self.rows
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
