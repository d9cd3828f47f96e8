//! Database seeder for OneFlow development and testing.
//!
//! Seeds a demo project with tasks and approved, uninvoiced timesheets so
//! the invoicing flow can be exercised locally.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;
use uuid::Uuid;

use oneflow_db::entities::{
    expenses, projects, sea_orm_active_enums::TimesheetStatus, tasks, timesheets,
};

/// Demo project ID (consistent for all seeds)
const DEMO_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = oneflow_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo project...");
    seed_demo_project(&db).await;

    println!("Seeding tasks...");
    let task_ids = seed_tasks(&db).await;

    println!("Seeding timesheets...");
    seed_timesheets(&db, &task_ids).await;

    println!("Seeding expenses...");
    seed_expenses(&db).await;

    println!("Seeding complete!");
}

fn demo_project_id() -> Uuid {
    Uuid::parse_str(DEMO_PROJECT_ID).unwrap()
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

async fn seed_demo_project(db: &DatabaseConnection) {
    let existing = projects::Entity::find_by_id(demo_project_id())
        .one(db)
        .await
        .expect("Failed to query projects");

    if existing.is_some() {
        println!("  Demo project already exists, skipping");
        return;
    }

    let project = projects::ActiveModel {
        id: Set(demo_project_id()),
        name: Set("Website Redesign".to_string()),
        created_at: Set(Utc::now().into()),
    };
    project.insert(db).await.expect("Failed to seed project");
}

async fn seed_tasks(db: &DatabaseConnection) -> Vec<Uuid> {
    let titles = ["API design", "Frontend build", "QA pass"];
    let mut ids = Vec::with_capacity(titles.len());

    for title in titles {
        let task_id = Uuid::now_v7();
        let task = tasks::ActiveModel {
            id: Set(task_id),
            project_id: Set(demo_project_id()),
            title: Set(title.to_string()),
            created_at: Set(Utc::now().into()),
        };
        task.insert(db).await.expect("Failed to seed task");
        ids.push(task_id);
    }

    ids
}

async fn seed_timesheets(db: &DatabaseConnection, task_ids: &[Uuid]) {
    let entries = [
        ("8", "95", Some(0), Some("kickoff and schema work")),
        ("6.5", "95", Some(1), None),
        ("4", "80", Some(2), Some("regression sweep")),
    ];

    for (i, (hours, rate, task_index, notes)) in entries.iter().enumerate() {
        let duration = Decimal::from_str(hours).unwrap();
        let rate = Decimal::from_str(rate).unwrap();
        let work_date = (Utc::now() - Duration::days(i64::try_from(i).unwrap() + 1)).date_naive();

        let timesheet = timesheets::ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(demo_project_id()),
            user_id: Set(demo_user_id()),
            task_id: Set(task_index.map(|t| task_ids[t])),
            work_date: Set(work_date),
            duration_hours: Set(duration),
            hourly_rate: Set(rate),
            amount: Set(duration * rate),
            status: Set(TimesheetStatus::Approved),
            invoiced: Set(false),
            invoice_id: Set(None),
            notes: Set(notes.map(String::from)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        timesheet
            .insert(db)
            .await
            .expect("Failed to seed timesheet");
    }
}

async fn seed_expenses(db: &DatabaseConnection) {
    let expense = expenses::ActiveModel {
        id: Set(Uuid::now_v7()),
        project_id: Set(demo_project_id()),
        user_id: Set(demo_user_id()),
        amount: Set(Decimal::from_str("129.99").unwrap()),
        currency: Set("USD".to_string()),
        category: Set("Software".to_string()),
        billable: Set(true),
        approved: Set(true),
        reimbursed: Set(false),
        expense_date: Set(Utc::now().date_naive()),
        created_at: Set(Utc::now().into()),
    };
    expense.insert(db).await.expect("Failed to seed expense");
}
