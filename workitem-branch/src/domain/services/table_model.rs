use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, Weak};

use crate::domain::{
    models::WorkItem,
    ports::{DisplayAdapter, WorkItemSelection},
    OutOfRangeError,
};

use super::ResultAccumulator;

/// Read-only view of the accumulated rows plus the user's row selection.
pub struct WorkItemsTableModel {
    accumulator: Arc<ResultAccumulator>,
    selection: RwLock<BTreeSet<usize>>,
}

impl WorkItemsTableModel {
    /// Create a view over `accumulator` and subscribe it to row changes.
    pub fn bound_to(accumulator: Arc<ResultAccumulator>) -> Arc<Self> {
        let model = Arc::new(Self {
            accumulator: accumulator.clone(),
            selection: RwLock::new(BTreeSet::new()),
        });
        let adapter: Weak<dyn DisplayAdapter> = Arc::downgrade(&model) as Weak<dyn DisplayAdapter>;
        accumulator.bind(adapter);
        model
    }

    pub fn row_count(&self) -> usize {
        self.accumulator.size()
    }

    pub fn work_item(&self, row: usize) -> Result<WorkItem, OutOfRangeError> {
        self.accumulator.get(row)
    }

    pub fn rows(&self) -> Vec<WorkItem> {
        self.accumulator.snapshot()
    }

    /// Replace the selection. Fails without changing it if any row is out of range.
    pub fn select_rows(&self, rows: &[usize]) -> Result<(), OutOfRangeError> {
        let len = self.row_count();
        if let Some(&index) = rows.iter().find(|&&row| row >= len) {
            return Err(OutOfRangeError { index, len });
        }

        *self
            .selection
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = rows.iter().copied().collect();
        Ok(())
    }

    /// Select every row holding one of `ids`. Returns how many rows were selected.
    pub fn select_ids(&self, ids: &[i32]) -> usize {
        let rows = self
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, item)| ids.contains(&item.id))
            .map(|(row, _)| row)
            .collect::<BTreeSet<_>>();
        let selected = rows.len();

        *self
            .selection
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = rows;
        selected
    }

    pub fn clear_selection(&self) {
        self.selection
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.selection
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .copied()
            .collect()
    }
}

impl WorkItemSelection for WorkItemsTableModel {
    fn selected_work_items(&self) -> Vec<WorkItem> {
        self.selected_rows()
            .into_iter()
            .filter_map(|row| self.accumulator.get(row).ok())
            .collect()
    }
}

impl DisplayAdapter for WorkItemsTableModel {
    fn notify_rows_added(&self, _first_row: usize, _count: usize) {
        // Appends never move existing rows, so the selection stays valid.
    }

    fn notify_reset(&self) {
        self.clear_selection();
    }
}
