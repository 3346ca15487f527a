//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides the Activity Directory API for non-WASM
//! environments using the reqwest crate.

use crate::error::{ErrorKind, Result};
use reqwest::{Client, Url};
use serde_json::Value;

use super::Membership;
use crate::config::ClientConfig;
use crate::interface::{ActivityApi, HttpClient};
use crate::model::dtos::{ErrorBody, MembershipParams, SignupResponse};

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    base_url: Url,
}

impl HttpClient for NoWasmClient {
    fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ErrorKind::ConfigError(format!(
                "invalid API base URL {:?}: {e}",
                config.api_base_url
            ))
        })?;

        Ok(Self { client, base_url })
    }
}

impl NoWasmClient {
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ErrorKind::ConfigError(format!("API base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn directory_url(&self) -> Result<Url> {
        self.endpoint(&["api", "activities"])
    }

    pub fn membership_url(&self, params: MembershipParams<'_>, action: Membership) -> Result<Url> {
        let mut url = self.endpoint(&["activities", params.activity_id, action.as_str()])?;
        url.query_pairs_mut().append_pair("email", params.email);
        Ok(url)
    }

    /// Sends the request and returns the body of a 2xx response. Anything
    /// else becomes `RequestRejected` carrying the server's `detail`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            log::debug!("request rejected with {status}: {text}");
            return Err(ErrorKind::RequestRejected {
                status: status.as_u16(),
                detail: ErrorBody::detail_from(&text),
            }
            .into());
        }

        Ok(text)
    }
}

impl ActivityApi for NoWasmClient {
    async fn fetch_directory(&self) -> Result<Value> {
        let url = self.directory_url()?;
        log::debug!("GET {url}");

        let text = self.send(self.client.get(url)).await?;
        Ok(serde_json::from_str::<Value>(&text)?)
    }

    async fn signup(&self, params: MembershipParams<'_>) -> Result<SignupResponse> {
        let url = self.membership_url(params, Membership::Signup)?;
        log::debug!("POST {url}");

        let text = self.send(self.client.post(url)).await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn unregister(&self, params: MembershipParams<'_>) -> Result<()> {
        let url = self.membership_url(params, Membership::Unregister)?;
        log::debug!("POST {url}");

        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> NoWasmClient {
        NoWasmClient::from_config(&ClientConfig::default().with_api_base_url(base)).unwrap()
    }

    #[test]
    fn test_directory_url() {
        let url = client("http://127.0.0.1:8000").directory_url().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/activities");
    }

    #[test]
    fn test_membership_url_encodes_id_and_email() {
        let params = MembershipParams {
            activity_id: "Chess Club",
            email: "a+b@x.edu",
        };
        let url = client("http://127.0.0.1:8000")
            .membership_url(params, Membership::Signup)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club/signup?email=a%2Bb%40x.edu"
        );
    }

    #[test]
    fn test_membership_url_keeps_base_path_and_escapes_slashes() {
        let params = MembershipParams {
            activity_id: "art/design",
            email: "j.doe@x.edu",
        };
        let url = client("http://school.example/portal/")
            .membership_url(params, Membership::Unregister)
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://school.example/portal/activities/art%2Fdesign/unregister?email=j.doe%40x.edu"
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let err = NoWasmClient::from_config(&ClientConfig::same_origin()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_transport_error() {
        let err = client("http://127.0.0.1:9").fetch_directory().await.unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ReqwestError(_)));
    }
}
