use azure_devops_rust_api::wit::models::WorkItem as AzureWorkItem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::reshape;
use crate::Identity;

pub const FIELD_TITLE: &str = "System.Title";
pub const FIELD_STATE: &str = "System.State";
pub const FIELD_WORK_ITEM_TYPE: &str = "System.WorkItemType";
pub const FIELD_ASSIGNED_TO: &str = "System.AssignedTo";

/// A work item as returned by the tracking service.
///
/// Fields are kept as the raw name → value map; only a handful of well-known
/// fields get typed accessors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: i32,
    #[serde(default)]
    pub rev: Option<i32>,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub relations: Vec<WorkItemRelation>,
    #[serde(default)]
    pub url: Option<String>,
}

impl WorkItem {
    /// A work item with no fields, as produced by an id-only lookup.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            rev: None,
            fields: Map::new(),
            relations: Vec::new(),
            url: None,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|value| value.as_str())
    }

    pub fn title(&self) -> &str {
        self.field_str(FIELD_TITLE).unwrap_or_default()
    }

    pub fn state(&self) -> &str {
        self.field_str(FIELD_STATE).unwrap_or_default()
    }

    pub fn work_item_type(&self) -> &str {
        self.field_str(FIELD_WORK_ITEM_TYPE).unwrap_or_default()
    }

    pub fn assigned_to(&self) -> Option<Identity> {
        self.fields
            .get(FIELD_ASSIGNED_TO)
            .and_then(|value| value.try_into().ok())
    }
}

impl TryFrom<AzureWorkItem> for WorkItem {
    type Error = serde_json::Error;

    fn try_from(work_item: AzureWorkItem) -> Result<Self, Self::Error> {
        reshape(work_item)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemRelation {
    pub rel: String,
    pub url: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl WorkItemRelation {
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
    }
}
