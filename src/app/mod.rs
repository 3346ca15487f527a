//! Application module - the roster sync controller
//!
//! `controller` holds the platform-independent logic. The wasm build adds
//! the browser entry point that wires the controller to the live page.

mod controller;
pub use controller::*;

#[cfg(feature = "wasm")]
pub mod wasm;
