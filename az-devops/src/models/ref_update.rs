use serde::{Deserialize, Serialize};

/// Object id git uses for "no object", e.g. the old value of a ref being created.
pub const ZERO_OBJECT_ID: &str = "0000000000000000000000000000000000000000";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRefUpdate {
    pub name: String,
    pub old_object_id: String,
    pub new_object_id: String,
}

impl GitRefUpdate {
    /// A ref update creating `refs/heads/{branch_name}` at `new_object_id`.
    pub fn create_branch(branch_name: &str, new_object_id: &str) -> Self {
        let name = if branch_name.starts_with("refs/") {
            branch_name.to_owned()
        } else {
            format!("refs/heads/{branch_name}")
        };

        Self {
            name,
            old_object_id: ZERO_OBJECT_ID.to_owned(),
            new_object_id: new_object_id.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GitRefUpdateResult {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub update_status: Option<String>,
    #[serde(default)]
    pub custom_message: Option<String>,
}
