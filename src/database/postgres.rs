use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Exam, ExamChanges, ExamOwner, ExamWithUser, Journal, JournalChanges, NewExam, NewJournal, NewUser, User,
};
use crate::database::store::{ExamStore, JournalStore, Store, UserStore};

const EXAM_WITH_USER: &str = r#"
    SELECT e.*, u.email AS user_email
    FROM exams e
    JOIN users u ON u.id = e.user_id
"#;

/// Exam row joined with the owner's email
#[derive(FromRow)]
struct ExamRow {
    #[sqlx(flatten)]
    exam: Exam,
    user_email: String,
}

impl From<ExamRow> for ExamWithUser {
    fn from(row: ExamRow) -> Self {
        let user = ExamOwner {
            id: row.exam.user_id.clone(),
            email: row.user_email,
        };
        ExamWithUser { exam: row.exam, user }
    }
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ExamStore for PgStore {
    async fn insert_exam(&self, exam: NewExam) -> Result<Exam, DatabaseError> {
        sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (title, q1, q2, q3, q4, q5, answer, answer_one, status, exam_type, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&exam.title)
        .bind(&exam.q1)
        .bind(&exam.q2)
        .bind(&exam.q3)
        .bind(&exam.q4)
        .bind(&exam.q5)
        .bind(&exam.answer)
        .bind(exam.answer_one)
        .bind(exam.status)
        .bind(exam.exam_type)
        .bind(&exam.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_insert)
    }

    async fn find_exam(&self, id: i32) -> Result<Option<ExamWithUser>, DatabaseError> {
        let sql = format!("{} WHERE e.id = $1", EXAM_WITH_USER);
        let row = sqlx::query_as::<_, ExamRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ExamWithUser::from))
    }

    async fn list_exams(&self) -> Result<Vec<ExamWithUser>, DatabaseError> {
        let sql = format!("{} ORDER BY e.created_at DESC, e.id DESC", EXAM_WITH_USER);
        let rows = sqlx::query_as::<_, ExamRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ExamWithUser::from).collect())
    }

    async fn update_exam(&self, id: i32, changes: &ExamChanges) -> Result<Option<Exam>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE exams SET updated_at = ");
        qb.push_bind(Utc::now());

        if let Some(v) = &changes.title {
            qb.push(", title = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.q1 {
            qb.push(", q1 = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.q2 {
            qb.push(", q2 = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.q3 {
            qb.push(", q3 = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.q4 {
            qb.push(", q4 = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.q5 {
            qb.push(", q5 = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.answer {
            qb.push(", answer = ").push_bind(v.clone());
        }
        if let Some(v) = changes.answer_one {
            qb.push(", answer_one = ").push_bind(v);
        }
        if let Some(v) = changes.status {
            qb.push(", status = ").push_bind(v);
        }
        if let Some(v) = changes.exam_type {
            qb.push(", exam_type = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let row = qb
            .build_query_as::<Exam>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_insert)?;
        Ok(row)
    }

    async fn delete_exam(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl JournalStore for PgStore {
    async fn insert_journal(&self, journal: NewJournal) -> Result<Journal, DatabaseError> {
        sqlx::query_as::<_, Journal>(
            r#"
            INSERT INTO journals (sleep_hours, note, goal, status, mood, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(journal.sleep_hours)
        .bind(&journal.note)
        .bind(&journal.goal)
        .bind(journal.status)
        .bind(journal.mood)
        .bind(&journal.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_insert)
    }

    async fn find_journal(&self, id: i32) -> Result<Option<Journal>, DatabaseError> {
        let row = sqlx::query_as::<_, Journal>("SELECT * FROM journals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_journals(&self) -> Result<Vec<Journal>, DatabaseError> {
        let rows = sqlx::query_as::<_, Journal>("SELECT * FROM journals ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_journal(&self, id: i32, changes: &JournalChanges) -> Result<Option<Journal>, DatabaseError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE journals SET updated_at = ");
        qb.push_bind(Utc::now());

        if let Some(v) = changes.sleep_hours {
            qb.push(", sleep_hours = ").push_bind(v);
        }
        if let Some(v) = &changes.note {
            qb.push(", note = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.goal {
            qb.push(", goal = ").push_bind(v.clone());
        }
        if let Some(v) = changes.status {
            qb.push(", status = ").push_bind(v);
        }
        if let Some(v) = changes.mood {
            qb.push(", mood = ").push_bind(v);
        }

        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let row = qb
            .build_query_as::<Journal>()
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_insert)?;
        Ok(row)
    }

    async fn delete_journal(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_insert)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, role, created_at FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
