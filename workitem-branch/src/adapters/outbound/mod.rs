pub mod azure_devops;
pub mod git;
