mod accumulator;
mod association;
mod lookup;
mod orchestrator;
mod table_model;
mod workitems_model;

pub use accumulator::ResultAccumulator;
pub use association::WitAssociationService;
pub use lookup::{WorkItemLookup, DEFAULT_PAGE_SIZE};
pub use orchestrator::BranchCreationOrchestrator;
pub use table_model::WorkItemsTableModel;
pub use workitems_model::{VcsWorkItemsModel, WorkflowCollaborators};
