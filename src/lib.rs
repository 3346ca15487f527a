pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;
pub mod test_utils;
pub mod view;

pub use app::{ActionOutcome, LoadSource, RosterController, SkipReason};
pub use config::ClientConfig;
pub use model::{Activity, Roster};

#[cfg(feature = "no-wasm")]
pub use client::request::NoWasmClient;
#[cfg(feature = "no-wasm")]
pub use tokio;

#[cfg(feature = "wasm")]
pub use client::gloo::WasmClient;
