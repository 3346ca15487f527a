//! In-memory page: holds what the browser would be showing and renders it
//! to HTML on demand. Used by the CLI and by tests.

use maud::{html, Markup};
use std::collections::HashSet;

use super::{markup, Control, Notice, View};
use crate::model::{Activity, Roster};

#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    /// One entry per rendered card, in list order
    cards: Vec<Activity>,
    disabled: HashSet<Control>,
    notice: Option<Notice>,
    form_resets: usize,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Participant rows currently shown for an activity.
    pub fn participants(&self, activity_id: &str) -> Option<&[String]> {
        self.card(activity_id).map(|card| card.participants.as_slice())
    }

    pub fn shows_placeholder(&self, activity_id: &str) -> bool {
        self.card(activity_id)
            .map(|card| card.participants.is_empty())
            .unwrap_or(false)
    }

    /// Values of the selector options, placeholder excluded.
    pub fn option_values(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }

    pub fn is_enabled(&self, control: &Control) -> bool {
        !self.disabled.contains(control)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn form_resets(&self) -> usize {
        self.form_resets
    }

    pub fn card_html(&self, activity_id: &str) -> Option<String> {
        self.card(activity_id)
            .map(|card| self.render_card(card).into_string())
    }

    pub fn to_html(&self) -> String {
        self.render().into_string()
    }

    fn render(&self) -> Markup {
        html! {
            select id="activity" name="activity" {
                (markup::activity_options(&self.cards))
            }
            div id="activities-list" {
                @for card in &self.cards {
                    (self.render_card(card))
                }
            }
            (markup::status_line(self.notice.as_ref()))
        }
    }

    fn render_card(&self, card: &Activity) -> Markup {
        markup::activity_card(card, |email| {
            self.disabled.contains(&Control::remove(&card.id, email))
        })
    }

    fn card(&self, activity_id: &str) -> Option<&Activity> {
        self.cards.iter().find(|card| card.id == activity_id)
    }

    fn card_mut(&mut self, activity_id: &str) -> Option<&mut Activity> {
        self.cards.iter_mut().find(|card| card.id == activity_id)
    }
}

impl View for HtmlView {
    fn render_roster(&mut self, roster: &Roster) {
        self.cards = roster.iter().cloned().collect();
        self.disabled.clear();
    }

    fn patch_participants(&mut self, activity: &Activity) {
        if let Some(card) = self.card_mut(&activity.id) {
            card.participants = activity.participants.clone();
        }
    }

    fn remove_participant_row(&mut self, activity: &Activity, email: &str) {
        if let Some(card) = self.card_mut(&activity.id) {
            card.participants.retain(|p| p != email);
        }
        self.disabled.remove(&Control::remove(&activity.id, email));
    }

    fn set_control_enabled(&mut self, control: &Control, enabled: bool) {
        if enabled {
            self.disabled.remove(control);
        } else {
            self.disabled.insert(control.clone());
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notice = Some(notice.clone());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn reset_form(&mut self) {
        self.form_resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_twice_is_identical() {
        let roster = Roster::fallback();
        let mut view = HtmlView::new();

        view.render_roster(&roster);
        let first = view.to_html();
        view.render_roster(&roster);

        assert_eq!(view.to_html(), first);
        assert_eq!(view.card_count(), 3);
        assert_eq!(view.option_values(), vec!["chess", "robotics", "drama"]);
    }

    #[test]
    fn test_render_replaces_previous_cards() {
        let mut view = HtmlView::new();
        view.render_roster(&Roster::fallback());
        view.render_roster(&Roster::new(vec![Activity::new("chess", "Chess Club", "", "")]));

        assert_eq!(view.card_count(), 1);
        assert!(view.participants("drama").is_none());
    }

    #[test]
    fn test_remove_last_row_shows_placeholder() {
        let mut roster = Roster::new(vec![
            Activity::new("chess", "Chess Club", "", "").with_participants(["a@x.edu"]),
        ]);
        let mut view = HtmlView::new();
        view.render_roster(&roster);

        roster.remove_participant("chess", "a@x.edu").unwrap();
        view.remove_participant_row(roster.get("chess").unwrap(), "a@x.edu");

        assert!(view.shows_placeholder("chess"));
        assert!(view.card_html("chess").unwrap().contains("No participants yet"));
    }

    #[test]
    fn test_disabled_remove_control_is_rendered() {
        let roster = Roster::fallback();
        let mut view = HtmlView::new();
        view.render_roster(&roster);

        let control = Control::remove("chess", "alice@mergington.edu");
        view.set_control_enabled(&control, false);
        assert!(!view.is_enabled(&control));
        assert!(view.card_html("chess").unwrap().contains("disabled"));

        view.set_control_enabled(&control, true);
        assert!(view.is_enabled(&control));
        assert!(!view.card_html("chess").unwrap().contains("disabled"));
    }

    #[test]
    fn test_page_contains_list_and_selector() {
        let mut view = HtmlView::new();
        view.render_roster(&Roster::fallback());
        let html = view.to_html();

        assert!(html.contains(r#"<select id="activity" name="activity">"#));
        assert!(html.contains(r#"<div id="activities-list">"#));
        assert_eq!(html.matches("activity-card").count(), 3);
    }
}
