use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, Result};
use crate::model::structs::Activity;

/// Common parameters for signup and unregister requests
#[derive(Debug, Clone, Copy)]
pub struct MembershipParams<'a> {
    pub activity_id: &'a str,
    pub email: &'a str,
}

/// Body of a successful signup. Missing or malformed bodies decode to the
/// default, and the caller supplies its own text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a rejected request
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parses a rejection body; `detail` may be a string or any JSON value.
    pub fn detail_from(text: &str) -> Option<String> {
        let body: ErrorBody = serde_json::from_str(text).ok()?;
        match body.detail? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Array-shaped directory entry
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_emails")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

/// Mapping-shaped directory entry, keyed by activity name
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityDetails {
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_emails")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

impl From<ActivityRecord> for Activity {
    fn from(record: ActivityRecord) -> Self {
        let title = record.title.unwrap_or_else(|| record.id.clone());
        Activity {
            id: record.id,
            title,
            meta: record.meta.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            participants: record.participants,
            max_participants: record.max_participants,
        }
    }
}

impl ActivityDetails {
    fn into_activity(self, name: String) -> Activity {
        Activity {
            id: name.clone(),
            title: name,
            meta: self.schedule.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            participants: self.participants,
            max_participants: self.max_participants,
        }
    }
}

/// Normalizes either directory shape into activities, keeping server order.
pub fn normalize_directory(data: Value) -> Result<Vec<Activity>> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .map(|item| -> Result<Activity> {
                Ok(serde_json::from_value::<ActivityRecord>(item)?.into())
            })
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .map(|(name, details)| -> Result<Activity> {
                let details: ActivityDetails = serde_json::from_value(details)?;
                Ok(details.into_activity(name))
            })
            .collect(),
        other => Err(ErrorKind::ParseError(format!(
            "activity directory must be an array or an object, got {}",
            json_type(&other)
        ))
        .into()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Anything other than an array counts as no participants; non-string
/// entries are dropped.
fn lenient_emails<'de, D>(deserializer: D) -> core::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_array_shape() {
        let data = json!([
            {
                "id": "chess",
                "title": "Chess Club",
                "meta": "Fridays",
                "description": "Strategy",
                "participants": ["a@x.edu"]
            },
            { "id": "robotics" }
        ]);

        let activities = normalize_directory(data).unwrap();

        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].title, "Chess Club");
        assert_eq!(activities[0].participants, vec!["a@x.edu"]);
        assert_eq!(activities[1].title, "robotics");
        assert_eq!(activities[1].meta, "");
        assert!(activities[1].participants.is_empty());
    }

    #[test]
    fn test_normalize_mapping_shape_keeps_server_order() {
        let data: Value = serde_json::from_str(
            r#"{
                "Programming Class": {
                    "description": "Learn programming",
                    "schedule": "Tuesdays, 3:30 PM",
                    "max_participants": 20,
                    "participants": ["emma@mergington.edu"]
                },
                "Chess Club": {
                    "description": "Learn strategies",
                    "schedule": "Fridays, 3:30 PM",
                    "max_participants": 12,
                    "participants": null
                }
            }"#,
        )
        .unwrap();

        let activities = normalize_directory(data).unwrap();

        assert_eq!(activities[0].id, "Programming Class");
        assert_eq!(activities[0].title, "Programming Class");
        assert_eq!(activities[0].meta, "Tuesdays, 3:30 PM");
        assert_eq!(activities[0].max_participants, Some(20));
        assert_eq!(activities[1].id, "Chess Club");
        assert!(activities[1].participants.is_empty());
    }

    #[test]
    fn test_normalize_rejects_scalar_payload() {
        let err = normalize_directory(json!("maintenance")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ParseError(_)));
    }

    #[test]
    fn test_normalize_rejects_record_without_id() {
        let err = normalize_directory(json!([{ "title": "No id" }])).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SerdeJsonError(_)));
    }

    #[test]
    fn test_error_body_detail() {
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail":"Activity is full"}"#),
            Some("Activity is full".to_string())
        );
        assert_eq!(ErrorBody::detail_from("<html>oops</html>"), None);
        assert_eq!(ErrorBody::detail_from("{}"), None);
    }
}
