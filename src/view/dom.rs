//! Live page view for the browser build.
//!
//! Writes the same maud fragments as `HtmlView` into the signup page's
//! elements, touching only the card an action belongs to.

use maud::html;
use std::collections::HashSet;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlFormElement};

use super::{markup, Control, Notice, NoticeKind, View};
use crate::error::{ErrorKind, Result};
use crate::model::{Activity, Roster};

pub const LIST_ID: &str = "activities-list";
pub const SELECT_ID: &str = "activity";
pub const FORM_ID: &str = "signup-form";
pub const MESSAGE_ID: &str = "message";

pub struct DomView {
    container: Element,
    select: Element,
    form: HtmlFormElement,
    message: Element,
    removing: HashSet<Control>,
}

impl DomView {
    /// Binds to the page's list, selector, form and status elements.
    pub fn mount(document: &Document) -> Result<Self> {
        let form = element(document, FORM_ID)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| ErrorKind::ConfigError(format!("#{FORM_ID} is not a form")))?;

        Ok(Self {
            container: element(document, LIST_ID)?,
            select: element(document, SELECT_ID)?,
            form,
            message: element(document, MESSAGE_ID)?,
            removing: HashSet::new(),
        })
    }

    fn card(&self, activity_id: &str) -> Option<Element> {
        find_by_attribute(&self.container, ".activity-card", "data-activity-id", activity_id)
    }

    fn participants_list(&self, activity_id: &str) -> Option<Element> {
        self.card(activity_id)?
            .query_selector(".participants-list")
            .ok()
            .flatten()
    }

    fn remove_button(&self, activity_id: &str, email: &str) -> Option<Element> {
        let card = self.card(activity_id)?;
        find_by_attribute(&card, ".participant-remove", "data-email", email)
    }

    fn submit_button(&self) -> Option<Element> {
        self.form.query_selector("button[type=submit]").ok().flatten()
    }

    fn participant_markup(&self, activity: &Activity) -> String {
        markup::participant_items(activity, |email| {
            self.removing.contains(&Control::remove(&activity.id, email))
        })
        .into_string()
    }
}

impl View for DomView {
    fn render_roster(&mut self, roster: &Roster) {
        self.removing.clear();
        let cards = html! {
            @for activity in roster {
                (markup::activity_card(activity, |_| false))
            }
        };
        self.container.set_inner_html(&cards.into_string());
        self.select
            .set_inner_html(&markup::activity_options(roster).into_string());
    }

    fn patch_participants(&mut self, activity: &Activity) {
        match self.participants_list(&activity.id) {
            Some(list) => list.set_inner_html(&self.participant_markup(activity)),
            None => log::warn!("no card on the page for {}", activity.id),
        }
    }

    fn remove_participant_row(&mut self, activity: &Activity, email: &str) {
        self.removing.remove(&Control::remove(&activity.id, email));

        if let Some(row) = self
            .remove_button(&activity.id, email)
            .and_then(|button| button.closest("li").ok().flatten())
        {
            row.remove();
        }

        if activity.participants.is_empty() {
            self.patch_participants(activity);
        }
    }

    fn set_control_enabled(&mut self, control: &Control, enabled: bool) {
        let button = match control {
            Control::Signup { .. } => self.submit_button(),
            Control::Remove { activity_id, email } => {
                if enabled {
                    self.removing.remove(control);
                } else {
                    self.removing.insert(control.clone());
                }
                self.remove_button(activity_id, email)
            }
        };

        if let Some(button) = button {
            let result = if enabled {
                button.remove_attribute("disabled")
            } else {
                button.set_attribute("disabled", "")
            };
            warn_on_js_error(result, "toggle disabled");
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        let classes = self.message.class_list();
        warn_on_js_error(
            classes.remove_3("hidden", NoticeKind::Success.class(), NoticeKind::Error.class()),
            "reset message classes",
        );
        warn_on_js_error(classes.add_1(notice.kind.class()), "set message class");
        self.message.set_text_content(Some(&notice.text));
    }

    fn clear_notice(&mut self) {
        let classes = self.message.class_list();
        warn_on_js_error(
            classes.remove_2(NoticeKind::Success.class(), NoticeKind::Error.class()),
            "reset message classes",
        );
        warn_on_js_error(classes.add_1("hidden"), "hide message");
        self.message.set_text_content(None);
    }

    fn reset_form(&mut self) {
        self.form.reset();
    }
}

fn element(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ErrorKind::ConfigError(format!("page has no #{id} element")).into())
}

/// First element under `root` matching `selector` whose `attribute` equals
/// `value`. Compares in Rust so values never end up inside a selector.
fn find_by_attribute(root: &Element, selector: &str, attribute: &str, value: &str) -> Option<Element> {
    let nodes = root.query_selector_all(selector).ok()?;
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .find(|el| el.get_attribute(attribute).as_deref() == Some(value))
}

fn warn_on_js_error(result: core::result::Result<(), JsValue>, what: &str) {
    if let Err(e) = result {
        log::warn!("failed to {what}: {e:?}");
    }
}
