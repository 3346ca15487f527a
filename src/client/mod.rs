//! Client module - Activity Directory API clients for both WASM and no-WASM environments
//!
//! `request` talks to the API with reqwest, `gloo` with the browser's fetch
//! API. Both share the endpoint layout below and encode the activity id as a
//! single path segment.

#[cfg(feature = "no-wasm")]
pub mod request;

#[cfg(feature = "wasm")]
pub mod gloo;

use std::time::Duration;

pub const DIRECTORY_PATH: &str = "/api/activities";

/// Membership action on a single activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Signup,
    Unregister,
}

impl Membership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Signup => "signup",
            Membership::Unregister => "unregister",
        }
    }
}

pub fn directory_url(base: &str) -> String {
    format!("{base}{DIRECTORY_PATH}")
}

/// Platform sleep used for notice expiry.
#[cfg(feature = "no-wasm")]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Platform sleep used for notice expiry.
#[cfg(all(feature = "wasm", not(feature = "no-wasm")))]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_url() {
        assert_eq!(
            directory_url("http://127.0.0.1:8000"),
            "http://127.0.0.1:8000/api/activities"
        );
        assert_eq!(directory_url(""), "/api/activities");
    }
}
