pub mod adapters;
pub mod domain;

#[cfg(test)]
mod mock;

pub use domain::models::*;
pub use domain::ports::*;
pub use domain::services::*;
pub use domain::{OutOfRangeError, WorkItemBranchError};
