use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::types::{AnswerOne, ExamType, Status};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i32,
    pub title: String,
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub q5: String,
    pub answer: String,
    pub answer_one: AnswerOne,
    pub status: Status,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub user_id: String,
    pub score: i32,
    pub percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owning user as joined onto exam reads
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamOwner {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamWithUser {
    #[serde(flatten)]
    pub exam: Exam,
    pub user: ExamOwner,
}

/// A fully validated exam ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewExam {
    pub title: String,
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    pub q5: String,
    pub answer: String,
    pub answer_one: AnswerOne,
    pub status: Status,
    pub exam_type: ExamType,
    pub user_id: String,
}

/// Sparse change-set for an exam update. `None` means "leave the column alone".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamChanges {
    pub title: Option<String>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
    pub answer: Option<String>,
    pub answer_one: Option<AnswerOne>,
    pub status: Option<Status>,
    pub exam_type: Option<ExamType>,
}

impl ExamChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the present fields to a row in place
    pub fn apply_to(&self, exam: &mut Exam) {
        if let Some(v) = &self.title {
            exam.title = v.clone();
        }
        if let Some(v) = &self.q1 {
            exam.q1 = v.clone();
        }
        if let Some(v) = &self.q2 {
            exam.q2 = v.clone();
        }
        if let Some(v) = &self.q3 {
            exam.q3 = v.clone();
        }
        if let Some(v) = &self.q4 {
            exam.q4 = v.clone();
        }
        if let Some(v) = &self.q5 {
            exam.q5 = v.clone();
        }
        if let Some(v) = &self.answer {
            exam.answer = v.clone();
        }
        if let Some(v) = self.answer_one {
            exam.answer_one = v;
        }
        if let Some(v) = self.status {
            exam.status = v;
        }
        if let Some(v) = self.exam_type {
            exam.exam_type = v;
        }
    }
}
