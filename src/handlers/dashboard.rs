// handlers/dashboard.rs - GET /dashboard

use axum::{extract::State, Extension};
use serde::Serialize;

use crate::actions::exams;
use crate::api::{ActionResult, Success};
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::models::{ExamWithUser, User};

/// An exam as listed on the dashboard, with display labels for its enums
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExam {
    #[serde(flatten)]
    pub exam: ExamWithUser,
    pub status_label: &'static str,
    pub type_label: &'static str,
}

impl From<ExamWithUser> for DashboardExam {
    fn from(exam: ExamWithUser) -> Self {
        Self {
            status_label: exam.exam.status.label(),
            type_label: exam.exam.exam_type.label(),
            exam,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub exams: Vec<DashboardExam>,
}

/// GET /dashboard - The signed-in user and every exam, newest first
pub async fn show(State(state): State<AppState>, Extension(caller): Extension<Caller>) -> ActionResult<Dashboard> {
    let user = caller.require()?.clone();
    let listed = exams::list(state.store.as_ref()).await?;

    let exams = listed.data.into_iter().map(DashboardExam::from).collect();
    Ok(Success::new("Dashboard loaded", Dashboard { user, exams }))
}
