use crate::database::models::{JournalChanges, NewJournal};
use crate::types::{Mood, Status};

use super::{FieldErrors, FieldReader, Mode, RawInput, TextRule};

pub const MIN_SLEEP_HOURS: i64 = 1;
pub const MAX_SLEEP_HOURS: i64 = 24;

const SLEEP_HOURS_REQUIRED: &str = "Sleep hours are required";
const SLEEP_HOURS_RANGE: &str = "Sleep hours must be between 1 and 24";
const USER_ID: TextRule = TextRule::min(1, "User ID is required");
const INVALID_STATUS: &str = "Please select a valid status";
const INVALID_MOOD: &str = "Please select a valid mood";

/// Validate a new journal entry. Status and mood fall back to backlog and calm,
/// empty note/goal become null.
pub fn validate_new(input: &RawInput) -> Result<NewJournal, FieldErrors> {
    let mut reader = FieldReader::new(input, Mode::Full);
    let sleep_hours = reader.whole_number(
        "sleepHours",
        MIN_SLEEP_HOURS,
        MAX_SLEEP_HOURS,
        SLEEP_HOURS_REQUIRED,
        SLEEP_HOURS_RANGE,
    );
    let note = reader.nullable_text("note");
    let goal = reader.nullable_text("goal");
    let status = reader.choice_or_default::<Status>("status", INVALID_STATUS);
    let mood = reader.choice_or_default::<Mood>("mood", INVALID_MOOD);
    let user_id = reader.text("userId", &USER_ID);
    let errors = reader.into_errors();

    match (sleep_hours, status, mood, user_id) {
        (Some(sleep_hours), Some(status), Some(mood), Some(user_id)) if errors.is_empty() => Ok(NewJournal {
            sleep_hours,
            note: note.flatten(),
            goal: goal.flatten(),
            status,
            mood,
            user_id,
        }),
        _ => Err(errors),
    }
}

/// Validate the supplied journal fields for a partial update
pub fn validate_changes(input: &RawInput) -> Result<JournalChanges, FieldErrors> {
    let mut reader = FieldReader::new(input, Mode::Partial);
    let changes = JournalChanges {
        sleep_hours: reader.whole_number(
            "sleepHours",
            MIN_SLEEP_HOURS,
            MAX_SLEEP_HOURS,
            SLEEP_HOURS_REQUIRED,
            SLEEP_HOURS_RANGE,
        ),
        note: reader.nullable_text("note"),
        goal: reader.nullable_text("goal"),
        status: reader.choice("status", INVALID_STATUS),
        mood: reader.choice("mood", INVALID_MOOD),
    };
    // checked for shape only; ownership does not move on update
    let _ = reader.text("userId", &USER_ID);

    let errors = reader.into_errors();
    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn input(value: Value) -> RawInput {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn minimal_entry_gets_defaults() {
        let journal = validate_new(&input(json!({ "sleepHours": 7, "userId": "u1" }))).unwrap();
        assert_eq!(journal.sleep_hours, 7);
        assert_eq!(journal.status, Status::Backlog);
        assert_eq!(journal.mood, Mood::Calm);
        assert_eq!(journal.note, None);
        assert_eq!(journal.goal, None);
    }

    #[test]
    fn empty_strings_count_as_not_supplied() {
        let journal = validate_new(&input(json!({
            "sleepHours": 6,
            "userId": "u1",
            "note": "",
            "status": "",
            "mood": null
        })))
        .unwrap();
        assert_eq!(journal.note, None);
        assert_eq!(journal.status, Status::Backlog);
        assert_eq!(journal.mood, Mood::Calm);
    }

    #[test]
    fn requires_sleep_hours_and_user() {
        let errors = validate_new(&input(json!({ "note": "tired" }))).unwrap_err();
        assert_eq!(errors.get("sleepHours"), Some(&["Sleep hours are required".to_string()][..]));
        assert!(errors.contains("userId"));
    }

    #[test]
    fn sleep_hours_must_be_in_range() {
        for hours in [0, 25, -3] {
            let errors = validate_new(&input(json!({ "sleepHours": hours, "userId": "u1" }))).unwrap_err();
            assert_eq!(
                errors.get("sleepHours"),
                Some(&["Sleep hours must be between 1 and 24".to_string()][..])
            );
        }
    }

    #[test]
    fn rejects_unknown_mood() {
        let errors = validate_new(&input(json!({ "sleepHours": 8, "userId": "u1", "mood": "angry" }))).unwrap_err();
        assert_eq!(errors.get("mood"), Some(&["Please select a valid mood".to_string()][..]));
    }

    #[test]
    fn changes_distinguish_clearing_from_absent() {
        let changes = validate_changes(&input(json!({ "note": null, "mood": "happy" }))).unwrap();
        assert_eq!(changes.note, Some(None));
        assert_eq!(changes.goal, None);
        assert_eq!(changes.mood, Some(Mood::Happy));
        assert_eq!(changes.status, None);
    }

    #[test]
    fn changes_do_not_default_missing_enums() {
        let changes = validate_changes(&input(json!({ "sleepHours": 5 }))).unwrap();
        assert_eq!(changes.status, None);
        assert_eq!(changes.mood, None);
    }
}
