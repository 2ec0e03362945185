//! Pure input validation.
//!
//! Validators take the untyped JSON object a client submitted and produce
//! either a strongly typed record or a [`FieldErrors`] report. They never
//! touch the store.

pub mod exam;
pub mod journal;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Untyped client input
pub type RawInput = Map<String, Value>;

/// Field name -> human readable messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Whether absent fields are errors (create) or simply skipped (update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Partial,
}

/// Length bounds and messages for a text field
pub struct TextRule {
    pub min: usize,
    pub max: Option<usize>,
    pub too_short: &'static str,
    pub too_long: &'static str,
}

impl TextRule {
    pub const fn min(min: usize, too_short: &'static str) -> Self {
        Self {
            min,
            max: None,
            too_short,
            too_long: "",
        }
    }

    pub const fn between(min: usize, max: usize, too_short: &'static str, too_long: &'static str) -> Self {
        Self {
            min,
            max: Some(max),
            too_short,
            too_long,
        }
    }
}

const REQUIRED: &str = "Required";

/// Reads fields out of a [`RawInput`], collecting every failure instead of
/// stopping at the first one. Each reader method returns `None` when the
/// field is absent or invalid.
pub struct FieldReader<'a> {
    input: &'a RawInput,
    mode: Mode,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a RawInput, mode: Mode) -> Self {
        Self {
            input,
            mode,
            errors: FieldErrors::new(),
        }
    }

    pub fn text(&mut self, field: &str, rule: &TextRule) -> Option<String> {
        let value = self.present(field, REQUIRED)?;
        let Value::String(s) = value else {
            self.errors.add(field, expected("string", value));
            return None;
        };

        let len = s.chars().count();
        if len < rule.min {
            self.errors.add(field, rule.too_short);
            return None;
        }
        if rule.max.is_some_and(|max| len > max) {
            self.errors.add(field, rule.too_long);
            return None;
        }
        Some(s.clone())
    }

    /// Optional free text. Outer `None`: absent. `Some(None)`: null or empty.
    pub fn nullable_text(&mut self, field: &str) -> Option<Option<String>> {
        let input: &'a RawInput = self.input;
        match input.get(field)? {
            Value::Null => Some(None),
            Value::String(s) if s.is_empty() => Some(None),
            Value::String(s) => Some(Some(s.clone())),
            other => {
                self.errors.add(field, expected("string", other));
                None
            }
        }
    }

    /// A member of a closed value set; any mismatch yields exactly `message`
    pub fn choice<T: DeserializeOwned>(&mut self, field: &str, message: &str) -> Option<T> {
        let value = self.present(field, message)?;
        match serde_json::from_value::<T>(value.clone()) {
            Ok(v) => Some(v),
            Err(_) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    /// Like [`choice`](Self::choice), but null or "" mean "not supplied" and
    /// fall back to the type's default in full mode.
    pub fn choice_or_default<T: DeserializeOwned + Default>(&mut self, field: &str, message: &str) -> Option<T> {
        let input: &'a RawInput = self.input;
        match input.get(field) {
            None | Some(Value::Null) => self.default_for_mode(),
            Some(Value::String(s)) if s.is_empty() => self.default_for_mode(),
            Some(_) => self.choice(field, message),
        }
    }

    /// Whole number within `min..=max`
    pub fn whole_number(&mut self, field: &str, min: i64, max: i64, missing: &str, out_of_range: &str) -> Option<i32> {
        let value = self.present(field, missing)?;
        let Some(n) = value.as_i64() else {
            let message = if value.is_number() {
                "Expected a whole number".to_string()
            } else {
                expected("number", value)
            };
            self.errors.add(field, message);
            return None;
        };
        if n < min || n > max {
            self.errors.add(field, out_of_range);
            return None;
        }
        i32::try_from(n).ok()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    fn present(&mut self, field: &str, missing: &str) -> Option<&'a Value> {
        let input: &'a RawInput = self.input;
        let value = input.get(field);
        if value.is_none() && self.mode == Mode::Full {
            self.errors.add(field, missing);
        }
        value
    }

    fn default_for_mode<T: Default>(&self) -> Option<T> {
        match self.mode {
            Mode::Full => Some(T::default()),
            Mode::Partial => None,
        }
    }
}

fn expected(kind: &str, value: &Value) -> String {
    let received = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("Expected {}, received {}", kind, received)
}
