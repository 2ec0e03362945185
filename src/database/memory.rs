use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Exam, ExamChanges, ExamOwner, ExamWithUser, Journal, JournalChanges, NewExam, NewJournal, NewUser, User,
};
use crate::database::store::{ExamStore, JournalStore, Store, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, User>,
    exams: BTreeMap<i32, Exam>,
    journals: BTreeMap<i32, Journal>,
    exam_seq: i32,
    journal_seq: i32,
}

impl Tables {
    fn require_user(&self, user_id: &str) -> Result<(), DatabaseError> {
        if self.users.contains_key(user_id) {
            Ok(())
        } else {
            Err(DatabaseError::Constraint(format!("user '{}' does not exist", user_id)))
        }
    }

    fn with_owner(&self, exam: &Exam) -> ExamWithUser {
        let email = self
            .users
            .get(&exam.user_id)
            .map(|u| u.email.clone())
            .unwrap_or_default();
        ExamWithUser {
            exam: exam.clone(),
            user: ExamOwner {
                id: exam.user_id.clone(),
                email,
            },
        }
    }
}

/// Process-local store with the same contract as the Postgres one,
/// including serial ids, foreign keys and unique emails.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExamStore for MemoryStore {
    async fn insert_exam(&self, exam: NewExam) -> Result<Exam, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_user(&exam.user_id)?;

        tables.exam_seq += 1;
        let now = Utc::now();
        let row = Exam {
            id: tables.exam_seq,
            title: exam.title,
            q1: exam.q1,
            q2: exam.q2,
            q3: exam.q3,
            q4: exam.q4,
            q5: exam.q5,
            answer: exam.answer,
            answer_one: exam.answer_one,
            status: exam.status,
            exam_type: exam.exam_type,
            user_id: exam.user_id,
            score: 0,
            percentage: 0,
            created_at: now,
            updated_at: now,
        };
        tables.exams.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_exam(&self, id: i32) -> Result<Option<ExamWithUser>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.exams.get(&id).map(|exam| tables.with_owner(exam)))
    }

    async fn list_exams(&self) -> Result<Vec<ExamWithUser>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut exams: Vec<ExamWithUser> = tables.exams.values().map(|e| tables.with_owner(e)).collect();
        exams.sort_by(|a, b| {
            b.exam
                .created_at
                .cmp(&a.exam.created_at)
                .then(b.exam.id.cmp(&a.exam.id))
        });
        Ok(exams)
    }

    async fn update_exam(&self, id: i32, changes: &ExamChanges) -> Result<Option<Exam>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.exams.get_mut(&id).map(|exam| {
            changes.apply_to(exam);
            exam.updated_at = Utc::now();
            exam.clone()
        }))
    }

    async fn delete_exam(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.exams.remove(&id).is_some())
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn insert_journal(&self, journal: NewJournal) -> Result<Journal, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.require_user(&journal.user_id)?;

        tables.journal_seq += 1;
        let now = Utc::now();
        let row = Journal {
            id: tables.journal_seq,
            sleep_hours: journal.sleep_hours,
            note: journal.note,
            goal: journal.goal,
            status: journal.status,
            mood: journal.mood,
            user_id: journal.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.journals.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_journal(&self, id: i32) -> Result<Option<Journal>, DatabaseError> {
        Ok(self.tables.read().await.journals.get(&id).cloned())
    }

    async fn list_journals(&self) -> Result<Vec<Journal>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut journals: Vec<Journal> = tables.journals.values().cloned().collect();
        journals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(journals)
    }

    async fn update_journal(&self, id: i32, changes: &JournalChanges) -> Result<Option<Journal>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.journals.get_mut(&id).map(|journal| {
            changes.apply_to(journal);
            journal.updated_at = Utc::now();
            journal.clone()
        }))
    }

    async fn delete_journal(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.journals.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!("email '{}' is already registered", user.email)));
        }
        if tables.users.contains_key(&user.id) {
            return Err(DatabaseError::Conflict(format!("user id '{}' is already taken", user.id)));
        }

        let row = User {
            id: user.id,
            email: user.email,
            password: user.password,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(row.id.clone(), row.clone());
        Ok(row)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
