use crate::database::models::{ExamChanges, NewExam};
use crate::types::{AnswerOne, ExamType, Status};

use super::{FieldErrors, FieldReader, Mode, RawInput, TextRule};

const TITLE: TextRule = TextRule::between(
    3,
    100,
    "Title must be at least 3 characters",
    "Title must be less than 100 characters",
);
const Q1: TextRule = TextRule::min(3, "Answer must be at least 3 characters");
const Q2: TextRule = TextRule::min(10, "Please write at least 10 characters");
const Q3: TextRule = TextRule::min(10, "Please write at least 10 characters");
const Q4: TextRule = TextRule::min(5, "Code explanation must be at least 5 characters");
const Q5: TextRule = TextRule::min(5, "Answer must be at least 5 characters");
const ANSWER: TextRule = TextRule::min(3, "Answer must be at least 3 characters");
const USER_ID: TextRule = TextRule::min(1, "User ID is required");

const INVALID_ANSWER_ONE: &str = "Please select an option";
const INVALID_STATUS: &str = "Please select a valid status";
const INVALID_TYPE: &str = "Please select a valid type";

/// Every field an exam form carries, each still optional
struct ExamFields {
    title: Option<String>,
    q1: Option<String>,
    q2: Option<String>,
    q3: Option<String>,
    q4: Option<String>,
    q5: Option<String>,
    answer: Option<String>,
    answer_one: Option<AnswerOne>,
    status: Option<Status>,
    exam_type: Option<ExamType>,
    user_id: Option<String>,
}

fn read(input: &RawInput, mode: Mode) -> (ExamFields, FieldErrors) {
    let mut reader = FieldReader::new(input, mode);
    let fields = ExamFields {
        title: reader.text("title", &TITLE),
        q1: reader.text("q1", &Q1),
        q2: reader.text("q2", &Q2),
        q3: reader.text("q3", &Q3),
        q4: reader.text("q4", &Q4),
        q5: reader.text("q5", &Q5),
        answer: reader.text("answer", &ANSWER),
        answer_one: reader.choice("answerOne", INVALID_ANSWER_ONE),
        status: reader.choice("status", INVALID_STATUS),
        exam_type: reader.choice("type", INVALID_TYPE),
        user_id: reader.text("userId", &USER_ID),
    };
    (fields, reader.into_errors())
}

/// Validate a complete exam for creation
pub fn validate_new(input: &RawInput) -> Result<NewExam, FieldErrors> {
    let (f, errors) = read(input, Mode::Full);
    match (
        f.title, f.q1, f.q2, f.q3, f.q4, f.q5, f.answer, f.answer_one, f.status, f.exam_type, f.user_id,
    ) {
        (
            Some(title),
            Some(q1),
            Some(q2),
            Some(q3),
            Some(q4),
            Some(q5),
            Some(answer),
            Some(answer_one),
            Some(status),
            Some(exam_type),
            Some(user_id),
        ) if errors.is_empty() => Ok(NewExam {
            title,
            q1,
            q2,
            q3,
            q4,
            q5,
            answer,
            answer_one,
            status,
            exam_type,
            user_id,
        }),
        _ => Err(errors),
    }
}

/// Validate whichever exam fields are present and build a sparse change-set.
/// `userId` is checked when supplied but never becomes part of the change-set:
/// ownership does not move on update.
pub fn validate_changes(input: &RawInput) -> Result<ExamChanges, FieldErrors> {
    let (f, errors) = read(input, Mode::Partial);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ExamChanges {
        title: f.title,
        q1: f.q1,
        q2: f.q2,
        q3: f.q3,
        q4: f.q4,
        q5: f.q5,
        answer: f.answer,
        answer_one: f.answer_one,
        status: f.status,
        exam_type: f.exam_type,
    })
}
