//! WASM HTTP client implementation using gloo_net
//!
//! This module provides the Activity Directory API for WASM environments
//! using the gloo_net crate, i.e. the browser's fetch API.

use crate::error::{ErrorKind, Result};
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;
use web_sys::{RequestCredentials, RequestMode};

use super::{directory_url, Membership};
use crate::config::ClientConfig;
use crate::interface::{ActivityApi, HttpClient};
use crate::model::dtos::{ErrorBody, MembershipParams, SignupResponse};

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    base_url: String,
}

impl HttpClient for WasmClient {
    fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.api_base_url.clone(),
        })
    }
}

impl WasmClient {
    fn with_defaults(builder: RequestBuilder) -> RequestBuilder {
        builder
            .mode(RequestMode::SameOrigin)
            .credentials(RequestCredentials::SameOrigin)
            .header("Accept", "application/json")
    }

    /// `{base}/activities/{id}/{action}`; the email goes in the query.
    fn membership_path(&self, activity_id: &str, action: Membership) -> String {
        let id: String = js_sys::encode_uri_component(activity_id).into();
        format!("{}/activities/{}/{}", self.base_url, id, action.as_str())
    }

    /// Returns the body of a 2xx response, otherwise `RequestRejected`
    /// carrying the server's `detail`.
    async fn send(builder: RequestBuilder) -> Result<String> {
        let resp = builder.send().await?;
        let ok = resp.ok();
        let status = resp.status();
        let text = resp.text().await?;

        if !ok {
            log::debug!("request rejected with {status}: {text}");
            return Err(ErrorKind::RequestRejected {
                status,
                detail: ErrorBody::detail_from(&text),
            }
            .into());
        }

        Ok(text)
    }

    async fn post_membership(&self, params: MembershipParams<'_>, action: Membership) -> Result<String> {
        let url = self.membership_path(params.activity_id, action);
        log::debug!("POST {url} email={}", params.email);

        let builder = Self::with_defaults(Request::post(&url)).query([("email", params.email)]);
        Self::send(builder).await
    }
}

impl ActivityApi for WasmClient {
    async fn fetch_directory(&self) -> Result<Value> {
        let url = directory_url(&self.base_url);
        log::debug!("GET {url}");

        let text = Self::send(Self::with_defaults(Request::get(&url))).await?;
        Ok(serde_json::from_str::<Value>(&text)?)
    }

    async fn signup(&self, params: MembershipParams<'_>) -> Result<SignupResponse> {
        let text = self.post_membership(params, Membership::Signup).await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn unregister(&self, params: MembershipParams<'_>) -> Result<()> {
        self.post_membership(params, Membership::Unregister).await?;
        Ok(())
    }
}
