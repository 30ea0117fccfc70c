use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

pub const DEFAULT_API_URL: &str = "https://dev.azure.com";

/// Personal access token used to authenticate against the REST API.
#[derive(Clone)]
pub struct Credential {
    pat: String,
}

impl Credential {
    pub fn from_pat(pat: impl Into<String>) -> Self {
        Self { pat: pat.into() }
    }

    pub(crate) fn into_api_credential(self) -> azure_devops_rust_api::Credential {
        azure_devops_rust_api::Credential::from_pat(self.pat)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("pat", &"***").finish()
    }
}

/// Reads a PAT from `$ADO_TOKEN`.
pub fn get_credential() -> Option<Credential> {
    match std::env::var("ADO_TOKEN") {
        Ok(token) if !token.is_empty() => {
            tracing::debug!("Authenticate using PAT provided via $ADO_TOKEN");
            Some(Credential::from_pat(token))
        }
        _ => None,
    }
}

/// Move a value between our models and the API's generated ones through
/// their shared JSON shape.
pub(crate) fn reshape<T: Serialize, U: DeserializeOwned>(value: T) -> serde_json::Result<U> {
    serde_json::from_value(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let credential = Credential::from_pat("secret-token");

        assert!(!format!("{credential:?}").contains("secret-token"));
    }

    #[test]
    fn reshape_renames_through_json() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Outgoing {
            new_object_id: &'static str,
        }

        let value: serde_json::Value = reshape(Outgoing { new_object_id: "abc" }).unwrap();

        assert_eq!(value["newObjectId"], "abc");
    }
}
