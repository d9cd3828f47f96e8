//! Audit log repository.
//!
//! Audit rows are append-only. `append` runs on the caller's connection so
//! document-creation repositories can write their audit entry inside the
//! same transaction as the document itself.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use oneflow_core::audit::AuditRecord;
use oneflow_shared::types::PageRequest;

use crate::entities::audit_logs;

/// Appends one audit record on the given connection.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn append<C: ConnectionTrait>(
    conn: &C,
    record: &AuditRecord,
) -> Result<audit_logs::Model, DbErr> {
    let entry = audit_logs::ActiveModel {
        id: Set(Uuid::now_v7()),
        action: Set(record.action.as_str().to_string()),
        entity_type: Set(record.entity_type.as_str().to_string()),
        entity_id: Set(record.entity_id),
        details: Set(record.details.clone()),
        created_at: Set(Utc::now().into()),
    };

    entry.insert(conn).await
}

/// Audit log repository for read access.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    db: DatabaseConnection,
}

impl AuditRepository {
    /// Creates a new audit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists audit entries, newest first, with the total row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<audit_logs::Model>, u64), DbErr> {
        let total = audit_logs::Entity::find().count(&self.db).await?;

        let entries = audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((entries, total))
    }
}
