//! Audit log routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use oneflow_db::AuditRepository;
use oneflow_db::entities::audit_logs;
use oneflow_shared::AppError;
use oneflow_shared::types::{PageRequest, PageResponse};

use super::error_response;
use crate::AppState;

/// Creates the audit log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

/// Response for an audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Recorded action.
    pub action: String,
    /// Entity kind.
    pub entity_type: String,
    /// Entity ID.
    pub entity_id: Uuid,
    /// Free-text details.
    pub details: String,
    /// Created at timestamp.
    pub created_at: String,
}

fn entry_response(entry: audit_logs::Model) -> AuditLogResponse {
    AuditLogResponse {
        id: entry.id,
        action: entry.action,
        entity_type: entry.entity_type,
        entity_id: entry.entity_id,
        details: entry.details,
        created_at: entry.created_at.to_rfc3339(),
    }
}

/// GET `/audit-logs` - List audit entries, newest first, paginated.
async fn list_audit_logs(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = AuditRepository::new((*state.db).clone());

    match repo.list(&page).await {
        Ok((entries, total)) => {
            let items: Vec<AuditLogResponse> =
                entries.into_iter().map(entry_response).collect();
            (StatusCode::OK, Json(PageResponse::new(items, &page, total))).into_response()
        }
        Err(e) => error_response(AppError::Database(e.to_string())),
    }
}
