use std::io::{self, Write};
use std::sync::{Arc, Mutex, Weak};

use workitem_branch::{DisplayAdapter, ResultAccumulator, WorkItem};

/// Prints rows to the terminal as they are appended.
pub struct TerminalTable {
    accumulator: Arc<ResultAccumulator>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl TerminalTable {
    pub fn attach(accumulator: Arc<ResultAccumulator>) -> Arc<Self> {
        Self::attach_with_output(accumulator, Box::new(io::stdout()))
    }

    pub fn attach_with_output(
        accumulator: Arc<ResultAccumulator>,
        output: Box<dyn Write + Send>,
    ) -> Arc<Self> {
        let table = Arc::new(Self {
            accumulator: accumulator.clone(),
            output: Mutex::new(output),
        });
        accumulator.bind(Arc::downgrade(&table) as Weak<dyn DisplayAdapter>);
        table
    }
}

pub fn format_row(row: usize, work_item: &WorkItem) -> String {
    format!(
        "{:>4}  {:>7}  {:<12} {:<10} {}",
        row,
        work_item.id,
        work_item.work_item_type(),
        work_item.state(),
        work_item.title()
    )
}

impl DisplayAdapter for TerminalTable {
    fn notify_rows_added(&self, first_row: usize, count: usize) {
        let Ok(mut output) = self.output.lock() else {
            return;
        };

        for row in first_row..first_row + count {
            match self.accumulator.get(row) {
                Ok(work_item) => {
                    if let Err(e) = writeln!(output, "{}", format_row(row, &work_item)) {
                        tracing::debug!(error = %e, "Stopped printing rows");
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Row vanished before it was printed");
                    break;
                }
            }
        }
    }

    fn notify_reset(&self) {}
}
