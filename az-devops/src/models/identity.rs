use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub unique_name: String,
    #[serde(rename = "imageUrl")]
    pub avatar_url: Option<String>,
}

impl TryFrom<&Value> for Identity {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value::<Identity>(value.clone())
    }
}
