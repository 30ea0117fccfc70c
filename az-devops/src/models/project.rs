use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The organizational container that scopes repositories and work items.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    pub id: Uuid,
    pub name: String,
}
