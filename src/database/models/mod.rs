pub mod exam;
pub mod journal;
pub mod user;

pub use exam::{Exam, ExamChanges, ExamOwner, ExamWithUser, NewExam};
pub use journal::{Journal, JournalChanges, NewJournal};
pub use user::{NewUser, User};
