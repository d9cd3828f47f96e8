//! Timesheet read routes for the invoicing flow.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use oneflow_db::TimesheetRepository;
use oneflow_db::entities::timesheets;
use oneflow_shared::AppError;

use super::error_response;
use crate::AppState;

/// Creates the timesheet routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/projects/{id}/uninvoiced-timesheets",
        get(list_uninvoiced_timesheets),
    )
}

/// Response for an uninvoiced timesheet.
#[derive(Debug, Serialize)]
pub struct TimesheetResponse {
    /// Timesheet ID.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Uuid,
    /// The team member who logged the time.
    pub user_id: Uuid,
    /// Linked task, if any.
    pub task_id: Option<Uuid>,
    /// Date the work was done.
    pub work_date: String,
    /// Hours worked.
    pub duration_hours: String,
    /// Rate per hour.
    pub hourly_rate: String,
    /// Billable amount.
    pub amount: String,
    /// Workflow status.
    pub status: String,
    /// Notes.
    pub notes: Option<String>,
}

fn timesheet_response(ts: timesheets::Model) -> TimesheetResponse {
    TimesheetResponse {
        id: ts.id,
        project_id: ts.project_id,
        user_id: ts.user_id,
        task_id: ts.task_id,
        work_date: ts.work_date.to_string(),
        duration_hours: ts.duration_hours.to_string(),
        hourly_rate: ts.hourly_rate.to_string(),
        amount: ts.amount.to_string(),
        status: oneflow_core::invoice::TimesheetStatus::from(ts.status)
            .as_str()
            .to_string(),
        notes: ts.notes,
    }
}

/// GET `/projects/{id}/uninvoiced-timesheets` - List a project's approved,
/// uninvoiced timesheets (the candidate set for invoice derivation).
async fn list_uninvoiced_timesheets(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TimesheetRepository::new((*state.db).clone());

    match repo.list_uninvoiced(project_id).await {
        Ok(timesheets) => {
            let items: Vec<TimesheetResponse> =
                timesheets.into_iter().map(timesheet_response).collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({ "timesheets": items })),
            )
                .into_response()
        }
        Err(e) => error_response(AppError::Database(e.to_string())),
    }
}
