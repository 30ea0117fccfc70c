use crate::domain::models::WorkItem;

/// Receives change notifications from a `ResultAccumulator`.
pub trait DisplayAdapter: Send + Sync {
    /// `count` rows were appended starting at `first_row`; earlier rows are unchanged.
    fn notify_rows_added(&self, first_row: usize, count: usize);

    /// Every row was removed.
    fn notify_reset(&self);
}

/// The rows the user currently has selected.
pub trait WorkItemSelection: Send + Sync {
    /// Selected work items in row order.
    fn selected_work_items(&self) -> Vec<WorkItem>;
}
