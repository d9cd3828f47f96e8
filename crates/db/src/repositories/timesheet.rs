//! Timesheet repository for invoicing reads.
//!
//! Timesheet entry and the approval workflow live outside this subsystem;
//! this repository only exposes the reads the invoicing flow needs.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TimesheetStatus, timesheets};

/// Timesheet repository for read operations.
#[derive(Debug, Clone)]
pub struct TimesheetRepository {
    db: DatabaseConnection,
}

impl TimesheetRepository {
    /// Creates a new timesheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a project's approved, uninvoiced timesheets.
    ///
    /// This is the candidate set for invoice derivation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_uninvoiced(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<timesheets::Model>, DbErr> {
        timesheets::Entity::find()
            .filter(timesheets::Column::ProjectId.eq(project_id))
            .filter(timesheets::Column::Status.eq(TimesheetStatus::Approved))
            .filter(timesheets::Column::Invoiced.eq(false))
            .order_by_asc(timesheets::Column::WorkDate)
            .all(&self.db)
            .await
    }
}
