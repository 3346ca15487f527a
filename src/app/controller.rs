//! Roster sync controller
//!
//! Owns the roster, the set of in-flight controls and the status notice,
//! and keeps the [`View`] consistent with them as the user signs up or
//! unregisters. Everything runs on one thread: state sits in `RefCell`s
//! and no borrow is held across an `.await`.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashSet;

use crate::{
    client,
    config::ClientConfig,
    error::Result,
    interface::ActivityApi,
    model::{
        dtos::{normalize_directory, MembershipParams},
        Roster,
    },
    view::{Control, Notice, NoticeId, NoticeKind, View},
};

pub const SIGNUP_SUCCESS_TEXT: &str = "Signed up successfully!";
pub const SIGNUP_FAILURE_TEXT: &str = "Failed to sign up";
pub const UNREGISTER_FAILURE_TEXT: &str = "Failed to unregister";

/// Where the current roster came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty email or no activity selected
    MissingInput,
    UnknownActivity,
    /// The same control already has a request in flight
    InFlight,
}

/// Result of a user action. Failures are already reported through a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed { notice: Option<NoticeId> },
    Failed { notice: NoticeId },
    Skipped(SkipReason),
}

impl ActionOutcome {
    pub fn notice(&self) -> Option<NoticeId> {
        match self {
            ActionOutcome::Completed { notice } => *notice,
            ActionOutcome::Failed { notice } => Some(*notice),
            ActionOutcome::Skipped(_) => None,
        }
    }
}

pub struct RosterController<A, V> {
    api: A,
    config: ClientConfig,
    roster: RefCell<Roster>,
    view: RefCell<V>,
    pending: RefCell<HashSet<Control>>,
    notice: RefCell<Option<Notice>>,
    last_notice: Cell<u64>,
}

impl<A: ActivityApi, V: View> RosterController<A, V> {
    pub fn new(api: A, view: V, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            roster: RefCell::new(Roster::default()),
            view: RefCell::new(view),
            pending: RefCell::new(HashSet::new()),
            notice: RefCell::new(None),
            last_notice: Cell::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn roster(&self) -> Ref<'_, Roster> {
        self.roster.borrow()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    pub fn is_pending(&self, control: &Control) -> bool {
        self.pending.borrow().contains(control)
    }

    /// Fetches the directory into the roster. Any failure (transport,
    /// non-2xx, unusable body) installs the built-in sample instead.
    pub async fn load(&self) -> LoadSource {
        let (roster, source) = match self.fetch_roster().await {
            Ok(roster) => {
                log::info!("loaded {} activities from the directory", roster.len());
                (roster, LoadSource::Remote)
            }
            Err(e) => {
                log::warn!("activity directory unavailable, using built-in sample: {e}");
                (Roster::fallback(), LoadSource::Fallback)
            }
        };

        *self.roster.borrow_mut() = roster;
        source
    }

    async fn fetch_roster(&self) -> Result<Roster> {
        let data = self.api.fetch_directory().await?;
        Ok(Roster::new(normalize_directory(data)?))
    }

    /// Rebuilds the list and the selector from the current roster. Controls
    /// with a request still in flight stay disabled.
    pub fn render(&self) {
        let roster = self.roster.borrow();
        let mut view = self.view.borrow_mut();

        view.render_roster(&roster);
        for control in self.pending.borrow().iter() {
            view.set_control_enabled(control, false);
        }
    }

    pub async fn start(&self) -> LoadSource {
        let source = self.load().await;
        self.render();
        source
    }

    pub async fn signup(&self, activity_id: &str, email: &str) -> ActionOutcome {
        let email = email.trim();
        if let Err(reason) = self.check_input(activity_id, email) {
            return ActionOutcome::Skipped(reason);
        }

        let control = Control::signup(activity_id);
        if !self.begin(&control) {
            log::debug!("signup for {activity_id} already in flight");
            return ActionOutcome::Skipped(SkipReason::InFlight);
        }

        let result = self
            .api
            .signup(MembershipParams { activity_id, email })
            .await;
        self.finish(&control);

        match result {
            Ok(resp) => {
                self.apply_signup(activity_id, email);
                let text = resp
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SIGNUP_SUCCESS_TEXT.to_string());
                let notice = self.show_notice(NoticeKind::Success, text);
                self.view.borrow_mut().reset_form();
                ActionOutcome::Completed {
                    notice: Some(notice),
                }
            }
            Err(e) => {
                log::warn!("signup of {email} for {activity_id} failed: {e}");
                let notice =
                    self.show_notice(NoticeKind::Error, e.user_message(SIGNUP_FAILURE_TEXT));
                ActionOutcome::Failed { notice }
            }
        }
    }

    /// Removal is applied only after the server confirms it.
    pub async fn unregister(&self, activity_id: &str, email: &str) -> ActionOutcome {
        if let Err(reason) = self.check_input(activity_id, email) {
            return ActionOutcome::Skipped(reason);
        }

        let control = Control::remove(activity_id, email);
        if !self.begin(&control) {
            log::debug!("unregister of {email} from {activity_id} already in flight");
            return ActionOutcome::Skipped(SkipReason::InFlight);
        }

        let result = self
            .api
            .unregister(MembershipParams { activity_id, email })
            .await;

        match result {
            Ok(()) => {
                self.pending.borrow_mut().remove(&control);
                self.apply_unregister(activity_id, email);
                ActionOutcome::Completed { notice: None }
            }
            Err(e) => {
                self.finish(&control);
                log::warn!("unregister of {email} from {activity_id} failed: {e}");
                let notice =
                    self.show_notice(NoticeKind::Error, e.user_message(UNREGISTER_FAILURE_TEXT));
                ActionOutcome::Failed { notice }
            }
        }
    }

    /// Waits out the notice's TTL, then clears it unless a newer notice has
    /// replaced it in the meantime.
    pub async fn expire_notice(&self, id: NoticeId) {
        let ttl = match self.notice.borrow().as_ref() {
            Some(notice) if notice.id == id => notice.ttl,
            _ => return,
        };

        client::sleep(ttl).await;
        self.dismiss_notice(id);
    }

    /// Clears the notice if it is still the current one.
    pub fn dismiss_notice(&self, id: NoticeId) -> bool {
        {
            let mut current = self.notice.borrow_mut();
            if current.as_ref().map(|n| n.id) != Some(id) {
                return false;
            }
            *current = None;
        }

        self.view.borrow_mut().clear_notice();
        true
    }

    fn check_input(&self, activity_id: &str, email: &str) -> core::result::Result<(), SkipReason> {
        if activity_id.is_empty() || email.is_empty() {
            log::debug!("skipping action with missing input");
            return Err(SkipReason::MissingInput);
        }
        if !self.roster.borrow().contains(activity_id) {
            log::debug!("skipping action for unknown activity {activity_id}");
            return Err(SkipReason::UnknownActivity);
        }
        Ok(())
    }

    /// Marks the control in flight and disables it. False if it already was.
    fn begin(&self, control: &Control) -> bool {
        if !self.pending.borrow_mut().insert(control.clone()) {
            return false;
        }
        self.view.borrow_mut().set_control_enabled(control, false);
        true
    }

    fn finish(&self, control: &Control) {
        self.pending.borrow_mut().remove(control);
        self.view.borrow_mut().set_control_enabled(control, true);
    }

    fn apply_signup(&self, activity_id: &str, email: &str) {
        let mut roster = self.roster.borrow_mut();
        match roster.add_participant(activity_id, email) {
            Ok(true) => {
                if let Some(activity) = roster.get(activity_id) {
                    self.view.borrow_mut().patch_participants(activity);
                }
            }
            Ok(false) => log::debug!("{email} already listed for {activity_id}"),
            Err(e) => log::warn!("signup confirmed but not applied: {e}"),
        }
    }

    fn apply_unregister(&self, activity_id: &str, email: &str) {
        let mut roster = self.roster.borrow_mut();
        if let Err(e) = roster.remove_participant(activity_id, email) {
            log::warn!("unregister confirmed but not applied: {e}");
            return;
        }
        if let Some(activity) = roster.get(activity_id) {
            self.view.borrow_mut().remove_participant_row(activity, email);
        }
    }

    fn show_notice(&self, kind: NoticeKind, text: String) -> NoticeId {
        let id = NoticeId(self.last_notice.get() + 1);
        self.last_notice.set(id.0);

        let ttl = match kind {
            NoticeKind::Success => self.config.success_notice_ttl,
            NoticeKind::Error => self.config.error_notice_ttl,
        };
        let notice = Notice { id, kind, text, ttl };

        self.view.borrow_mut().show_notice(&notice);
        *self.notice.borrow_mut() = Some(notice);
        id
    }
}
