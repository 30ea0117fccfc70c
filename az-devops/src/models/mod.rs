mod artifact_link;
mod identity;
mod project;
mod ref_update;
mod repository;
mod work_item;

pub use artifact_link::*;
pub use identity::Identity;
pub use project::TeamProjectReference;
pub use ref_update::*;
pub use repository::GitRepositoryRef;
pub use work_item::*;
