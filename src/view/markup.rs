//! HTML fragments for the signup page, rendered with maud.
//!
//! Every interpolated value goes through maud's escaping, so emails, titles
//! and server messages can never inject markup.

use maud::{html, Markup};

use super::Notice;
use crate::model::Activity;

pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS: &str = "No participants yet";

/// `<option>` children of the activity selector, placeholder first.
pub fn activity_options<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Markup {
    html! {
        option value="" { (SELECT_PLACEHOLDER) }
        @for activity in activities {
            option value=(activity.id) { (activity.title) }
        }
    }
}

pub fn participant_row(email: &str, removing: bool) -> Markup {
    html! {
        li.participant data-email=(email) {
            span.participant-avatar aria-hidden="true" {}
            span.participant-email { (email) }
            button.participant-remove type="button" data-email=(email)
                aria-label="Remove participant" disabled[removing] { "×" }
        }
    }
}

/// Children of `ul.participants-list`: one row per participant, or the
/// placeholder row when there are none.
pub fn participant_items(activity: &Activity, removing: impl Fn(&str) -> bool) -> Markup {
    html! {
        @if activity.participants.is_empty() {
            li.no-participants { (NO_PARTICIPANTS) }
        } @else {
            @for email in &activity.participants {
                (participant_row(email, removing(email)))
            }
        }
    }
}

pub fn activity_card(activity: &Activity, removing: impl Fn(&str) -> bool) -> Markup {
    html! {
        article.activity-card data-activity-id=(activity.id) {
            h4.activity-title { (activity.title) }
            p.activity-meta { (activity.meta) }
            p.activity-description { (activity.description) }
            @if let Some(left) = activity.spots_left() {
                p.activity-availability { (left) " spots left" }
            }
            div.participants {
                h5.participants-heading { "Participants" }
                ul.participants-list {
                    (participant_items(activity, removing))
                }
            }
        }
    }
}

pub fn status_line(notice: Option<&Notice>) -> Markup {
    match notice {
        Some(notice) => {
            let class = format!("message {}", notice.kind.class());
            html! {
                div id="message" class=(class) role="status" { (notice.text) }
            }
        }
        None => html! {
            div id="message" class="message hidden" role="status" {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{NoticeId, NoticeKind};
    use std::time::Duration;

    fn chess() -> Activity {
        Activity::new("chess", "Chess Club", "Fridays • 3:30pm", "Strategy and tournaments.")
    }

    #[test]
    fn test_options_start_with_placeholder() {
        let activities = [chess()];
        let html = activity_options(activities.iter()).into_string();

        assert!(html.starts_with(r#"<option value="">-- Select an activity --</option>"#));
        assert!(html.contains(r#"<option value="chess">Chess Club</option>"#));
    }

    #[test]
    fn test_card_escapes_participant_email() {
        let activity = chess().with_participants(["<script>alert(1)</script>@x.edu"]);
        let html = activity_card(&activity, |_| false).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;@x.edu"));
    }

    #[test]
    fn test_card_escapes_attribute_values() {
        let activity = Activity::new(r#"a"b"#, "Quote", "", "");
        let html = activity_card(&activity, |_| false).into_string();

        assert!(html.contains(r#"data-activity-id="a&quot;b""#));
    }

    #[test]
    fn test_empty_card_shows_placeholder() {
        let html = activity_card(&chess(), |_| false).into_string();

        assert!(html.contains(r#"<li class="no-participants">No participants yet</li>"#));
        assert!(!html.contains("participant-remove"));
    }

    #[test]
    fn test_removing_row_is_disabled() {
        let activity = chess().with_participants(["a@x.edu", "b@x.edu"]);
        let html = participant_items(&activity, |email| email == "b@x.edu").into_string();

        assert_eq!(html.matches("disabled").count(), 1);
        let b_row = html.split("<li").find(|row| row.contains("b@x.edu")).unwrap();
        assert!(b_row.contains("disabled"));
    }

    #[test]
    fn test_card_shows_spots_left_when_capacity_known() {
        let mut activity = chess().with_participants(["a@x.edu"]);
        activity.max_participants = Some(12);
        let html = activity_card(&activity, |_| false).into_string();

        assert!(html.contains("11 spots left"));
    }

    #[test]
    fn test_status_line() {
        let notice = Notice {
            id: NoticeId(1),
            kind: NoticeKind::Error,
            text: "Student <b>already</b> signed up".to_string(),
            ttl: Duration::from_secs(3),
        };

        let shown = status_line(Some(&notice)).into_string();
        assert!(shown.contains(r#"class="message error""#));
        assert!(shown.contains("Student &lt;b&gt;already&lt;/b&gt; signed up"));

        let hidden = status_line(None).into_string();
        assert!(hidden.contains(r#"class="message hidden""#));
    }
}
