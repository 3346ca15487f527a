//! Data model: activities, the roster and the API wire formats.

pub mod dtos;
pub mod structs;

pub use structs::{Activity, Roster};
