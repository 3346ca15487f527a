#![allow(async_fn_in_trait)] // single-threaded callers only, no Send bound needed

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::dtos::{MembershipParams, SignupResponse};
use serde_json::Value;

/// Common trait for HTTP client construction
pub trait HttpClient {
    /// Create a new HTTP client instance
    fn from_config(config: &ClientConfig) -> Result<Self>
    where
        Self: Sized;
}

/// Operations of the Activity Directory API
pub trait ActivityApi {
    /// Fetch the raw activity directory (array or name mapping)
    async fn fetch_directory(&self) -> Result<Value>;

    /// Sign `params.email` up for `params.activity_id`
    async fn signup(&self, params: MembershipParams<'_>) -> Result<SignupResponse>;

    /// Remove `params.email` from `params.activity_id`
    async fn unregister(&self, params: MembershipParams<'_>) -> Result<()>;
}
