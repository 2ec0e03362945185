//! Closed value sets shared by the entity rows, the validators and the store.
//!
//! Each enum maps one-to-one onto a PostgreSQL enum type created by
//! `database/schema.sql`, so neither the API nor the store can hold a value
//! outside its set.

use serde::{Deserialize, Serialize};

/// Workflow status of an exam or journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "entry_status", rename_all = "snake_case")]
pub enum Status {
    #[default]
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }
}

/// Kind of assessment an exam record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "exam_type", rename_all = "lowercase")]
pub enum ExamType {
    #[default]
    Test,
    Assessment,
    Exam,
}

impl ExamType {
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::Test => "Test",
            ExamType::Assessment => "Assessment",
            ExamType::Exam => "Exam",
        }
    }
}

/// Candidate answers for the exam's multiple-choice question.
/// Stored lowercase; the capitalised spelling used by the form is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "answer_one", rename_all = "lowercase")]
pub enum AnswerOne {
    #[serde(alias = "Allah")]
    Allah,
    #[serde(alias = "Muhammad")]
    Muhammad,
    #[serde(alias = "Adam")]
    Adam,
}

/// Mood recorded with a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "mood", rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    #[default]
    Calm,
}

/// Account role; ADMIN unlocks the /admin routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Admin => "ADMIN",
        }
    }
}

/// Entity kinds, used to phrase operation results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Exam,
    Journal,
    User,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Exam => write!(f, "exam"),
            Entity::Journal => write!(f, "journal"),
            Entity::User => write!(f, "user"),
        }
    }
}

/// Operations supported throughout the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Select,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Select => "fetch",
        }
    }

    pub fn gerund(&self) -> &'static str {
        match self {
            Operation::Create => "creating",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
            Operation::Select => "fetching",
        }
    }
}
