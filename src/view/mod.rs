//! View module - the page regions the controller keeps in sync
//!
//! The controller never touches markup directly. It talks to a [`View`],
//! which owns the activity list, the activity selector, the per-row remove
//! controls and the status line. `document::HtmlView` keeps those regions in
//! memory and renders them with maud; `dom::DomView` (wasm only) writes the
//! same fragments into the live page.

pub mod document;
pub mod markup;

#[cfg(feature = "wasm")]
pub mod dom;

pub use document::HtmlView;

use crate::model::{Activity, Roster};
use std::time::Duration;

/// An interactive element whose enabled state follows in-flight requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    /// The signup form, while a signup for this activity is pending
    Signup { activity_id: String },
    /// The remove button on one participant row
    Remove { activity_id: String, email: String },
}

impl Control {
    pub fn signup(activity_id: &str) -> Self {
        Control::Signup {
            activity_id: activity_id.to_string(),
        }
    }

    pub fn remove(activity_id: &str, email: &str) -> Self {
        Control::Remove {
            activity_id: activity_id.to_string(),
            email: email.to_string(),
        }
    }

    pub fn activity_id(&self) -> &str {
        match self {
            Control::Signup { activity_id } | Control::Remove { activity_id, .. } => activity_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// CSS class of the status line for this kind
    pub fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Transient status message. Cleared after `ttl` unless replaced first.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub text: String,
    pub ttl: Duration,
}

/// DOM rendering primitives used by the roster controller
pub trait View {
    /// Clear and rebuild the activity list and the activity selector.
    fn render_roster(&mut self, roster: &Roster);

    /// Replace the participant list of one activity card.
    fn patch_participants(&mut self, activity: &Activity);

    /// Drop one participant row. `activity` is the already-updated state, so
    /// an empty list means the placeholder row should appear.
    fn remove_participant_row(&mut self, activity: &Activity, email: &str);

    fn set_control_enabled(&mut self, control: &Control, enabled: bool);

    fn show_notice(&mut self, notice: &Notice);

    fn clear_notice(&mut self);

    /// Clear the signup form inputs after a successful signup.
    fn reset_form(&mut self);
}
