use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::types::{Mood, Status};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    pub id: i32,
    pub sleep_hours: i32,
    pub note: Option<String>,
    pub goal: Option<String>,
    pub status: Status,
    pub mood: Mood,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJournal {
    pub sleep_hours: i32,
    pub note: Option<String>,
    pub goal: Option<String>,
    pub status: Status,
    pub mood: Mood,
    pub user_id: String,
}

/// Sparse change-set for a journal update.
/// `note`/`goal` are doubly optional: `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalChanges {
    pub sleep_hours: Option<i32>,
    pub note: Option<Option<String>>,
    pub goal: Option<Option<String>>,
    pub status: Option<Status>,
    pub mood: Option<Mood>,
}

impl JournalChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, journal: &mut Journal) {
        if let Some(v) = self.sleep_hours {
            journal.sleep_hours = v;
        }
        if let Some(v) = &self.note {
            journal.note = v.clone();
        }
        if let Some(v) = &self.goal {
            journal.goal = v.clone();
        }
        if let Some(v) = self.status {
            journal.status = v;
        }
        if let Some(v) = self.mood {
            journal.mood = v;
        }
    }
}
