use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    /// Schedule line, e.g. "Fridays • 3:30pm"
    pub meta: String,
    pub description: String,
    /// Emails in signup order, no duplicates
    pub participants: Vec<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

impl Activity {
    pub fn new(id: &str, title: &str, meta: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            meta: meta.to_string(),
            description: description.to_string(),
            participants: Vec::new(),
            max_participants: None,
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self.dedup_participants();
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn spots_left(&self) -> Option<u32> {
        self.max_participants
            .map(|max| max.saturating_sub(self.participants.len() as u32))
    }

    fn dedup_participants(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.participants.retain(|p| seen.insert(p.clone()));
    }
}

/// In-memory snapshot of all activities, keyed by id, in directory order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    activities: Vec<Activity>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn new(activities: Vec<Activity>) -> Self {
        let mut roster = Self::default();
        for mut activity in activities {
            if roster.index.contains_key(&activity.id) {
                log::warn!("duplicate activity id {:?} in directory, keeping the first", activity.id);
                continue;
            }
            activity.dedup_participants();
            roster.index.insert(activity.id.clone(), roster.activities.len());
            roster.activities.push(activity);
        }
        roster
    }

    /// Built-in sample used when the directory cannot be fetched.
    pub fn fallback() -> Self {
        Self::new(vec![
            Activity::new("chess", "Chess Club", "Fridays • 3:30pm", "Strategy and tournaments.")
                .with_participants(["alice@mergington.edu"]),
            Activity::new("robotics", "Robotics Team", "Mon/Wed • 4:00pm", "Build and program robots."),
            Activity::new("drama", "Drama Club", "Thu • 5:00pm", "Performances and workshops.")
                .with_participants(["j.doe@mergington.edu", "s.smith@mergington.edu"]),
        ])
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.index.get(id).map(|&i| &self.activities[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    /// Appends `email` unless it is already listed. Returns whether the list
    /// changed.
    pub fn add_participant(&mut self, id: &str, email: &str) -> Result<bool> {
        let activity = self.get_mut(id)?;
        if activity.has_participant(email) {
            return Ok(false);
        }
        activity.participants.push(email.to_string());
        Ok(true)
    }

    /// Removes `email` if present. Returns whether the list changed.
    pub fn remove_participant(&mut self, id: &str, email: &str) -> Result<bool> {
        let activity = self.get_mut(id)?;
        match activity.participants.iter().position(|p| p == email) {
            Some(pos) => {
                activity.participants.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Activity> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| ErrorKind::UnknownActivity(id.to_string()))?;
        Ok(&mut self.activities[i])
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}
