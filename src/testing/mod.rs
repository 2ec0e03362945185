//! Helpers shared by the unit tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::{Caller, SessionKeys};
use crate::database::manager::DatabaseError;
use crate::database::memory::MemoryStore;
use crate::database::models::{
    Exam, ExamChanges, ExamWithUser, Journal, JournalChanges, NewExam, NewJournal, NewUser, User,
};
use crate::database::store::{ExamStore, JournalStore, Store, UserStore};
use crate::types::Role;
use crate::validation::RawInput;

pub fn input(value: Value) -> RawInput {
    value.as_object().cloned().expect("test input must be a JSON object")
}

pub fn session_keys() -> SessionKeys {
    SessionKeys::new("test-secret", 1).expect("non-empty secret")
}

pub async fn seed_user(store: &dyn UserStore, id: &str, role: Role) -> User {
    store
        .insert_user(NewUser {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            password: String::new(),
            role,
        })
        .await
        .expect("seed user")
}

pub async fn signed_in(store: &dyn UserStore, id: &str, role: Role) -> Caller {
    Caller::user(seed_user(store, id, role).await)
}

fn outage() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
}

/// Users resolve normally; every exam and journal operation fails like a lost connection
pub struct FailingStore {
    users: MemoryStore,
    user: User,
}

impl FailingStore {
    pub async fn with_user(id: &str) -> Self {
        let users = MemoryStore::new();
        let user = seed_user(&users, id, Role::Student).await;
        Self { users, user }
    }

    pub fn caller(&self) -> Caller {
        Caller::user(self.user.clone())
    }
}

#[async_trait]
impl ExamStore for FailingStore {
    async fn insert_exam(&self, _exam: NewExam) -> Result<Exam, DatabaseError> {
        Err(outage())
    }

    async fn find_exam(&self, _id: i32) -> Result<Option<ExamWithUser>, DatabaseError> {
        Err(outage())
    }

    async fn list_exams(&self) -> Result<Vec<ExamWithUser>, DatabaseError> {
        Err(outage())
    }

    async fn update_exam(&self, _id: i32, _changes: &ExamChanges) -> Result<Option<Exam>, DatabaseError> {
        Err(outage())
    }

    async fn delete_exam(&self, _id: i32) -> Result<bool, DatabaseError> {
        Err(outage())
    }
}

#[async_trait]
impl JournalStore for FailingStore {
    async fn insert_journal(&self, _journal: NewJournal) -> Result<Journal, DatabaseError> {
        Err(outage())
    }

    async fn find_journal(&self, _id: i32) -> Result<Option<Journal>, DatabaseError> {
        Err(outage())
    }

    async fn list_journals(&self) -> Result<Vec<Journal>, DatabaseError> {
        Err(outage())
    }

    async fn update_journal(&self, _id: i32, _changes: &JournalChanges) -> Result<Option<Journal>, DatabaseError> {
        Err(outage())
    }

    async fn delete_journal(&self, _id: i32) -> Result<bool, DatabaseError> {
        Err(outage())
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.users.insert_user(user).await
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        self.users.find_user(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.users.find_user_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.users.list_users().await
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(outage())
    }
}

