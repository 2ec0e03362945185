use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Exam, ExamChanges, ExamWithUser, Journal, JournalChanges, NewExam, NewJournal, NewUser, User,
};

#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn insert_exam(&self, exam: NewExam) -> Result<Exam, DatabaseError>;

    async fn find_exam(&self, id: i32) -> Result<Option<ExamWithUser>, DatabaseError>;

    /// All exams, newest first
    async fn list_exams(&self) -> Result<Vec<ExamWithUser>, DatabaseError>;

    /// Writes only the columns present in `changes` (plus `updated_at`).
    /// Returns `None` when no row has the id.
    async fn update_exam(&self, id: i32, changes: &ExamChanges) -> Result<Option<Exam>, DatabaseError>;

    /// Returns whether a row was removed
    async fn delete_exam(&self, id: i32) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn insert_journal(&self, journal: NewJournal) -> Result<Journal, DatabaseError>;

    async fn find_journal(&self, id: i32) -> Result<Option<Journal>, DatabaseError>;

    /// All journal entries, newest first
    async fn list_journals(&self) -> Result<Vec<Journal>, DatabaseError>;

    async fn update_journal(&self, id: i32, changes: &JournalChanges) -> Result<Option<Journal>, DatabaseError>;

    async fn delete_journal(&self, id: i32) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `DatabaseError::Conflict` when the email is taken
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
}

/// Everything the actions need from persistence
#[async_trait]
pub trait Store: ExamStore + JournalStore + UserStore {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
