mod models;
mod repo_client;
mod utils;

pub use models::*;
pub use repo_client::RepoClient;
pub use repo_client::RepoClientError;
pub use utils::{get_credential, Credential, DEFAULT_API_URL};
