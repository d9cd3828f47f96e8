//! Initial database migration.
//!
//! Creates the finance schema: document status enums, project/task/timesheet
//! tables, the four document kinds with their line tables, and the audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PROJECTS & TASKS
        // ============================================================
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(TASKS_SQL).await?;

        // ============================================================
        // PART 3: TIMESHEETS & EXPENSES
        // ============================================================
        db.execute_unprepared(TIMESHEETS_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;

        // ============================================================
        // PART 4: SALES ORDERS
        // ============================================================
        db.execute_unprepared(SALES_ORDERS_SQL).await?;
        db.execute_unprepared(SALES_ORDER_LINES_SQL).await?;

        // ============================================================
        // PART 5: PURCHASE ORDERS
        // ============================================================
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDER_LINES_SQL).await?;

        // ============================================================
        // PART 6: CUSTOMER INVOICES
        // ============================================================
        db.execute_unprepared(CUSTOMER_INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_LINES_SQL).await?;

        // ============================================================
        // PART 7: VENDOR BILLS
        // ============================================================
        db.execute_unprepared(VENDOR_BILLS_SQL).await?;
        db.execute_unprepared(BILL_LINES_SQL).await?;

        // ============================================================
        // PART 8: AUDIT LOG
        // ============================================================
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        // ============================================================
        // PART 9: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Timesheet workflow states
CREATE TYPE timesheet_status AS ENUM (
    'draft',
    'submitted',
    'approved',
    'rejected'
);

-- Sales order lifecycle
CREATE TYPE sales_order_status AS ENUM (
    'draft',
    'posted',
    'paid',
    'cancelled'
);

-- Purchase order lifecycle ('billed' marks orders derived into a bill)
CREATE TYPE purchase_order_status AS ENUM (
    'draft',
    'posted',
    'billed',
    'cancelled'
);

-- Vendor bill lifecycle
CREATE TYPE vendor_bill_status AS ENUM (
    'draft',
    'posted',
    'paid',
    'cancelled'
);

-- Customer invoice lifecycle
CREATE TYPE invoice_status AS ENUM (
    'draft',
    'posted',
    'paid',
    'cancelled'
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TASKS_SQL: &str = r"
CREATE TABLE tasks (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TIMESHEETS_SQL: &str = r"
CREATE TABLE timesheets (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    user_id UUID NOT NULL,
    task_id UUID REFERENCES tasks(id) ON DELETE SET NULL,
    work_date DATE NOT NULL,
    duration_hours NUMERIC(15, 4) NOT NULL DEFAULT 0,
    hourly_rate NUMERIC(15, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    status timesheet_status NOT NULL DEFAULT 'draft',
    invoiced BOOLEAN NOT NULL DEFAULT FALSE,
    invoice_id UUID,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    -- An invoiced timesheet must reference its invoice
    CONSTRAINT timesheets_invoiced_requires_invoice
        CHECK (NOT invoiced OR invoice_id IS NOT NULL)
);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    user_id UUID NOT NULL,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL DEFAULT 'USD',
    category TEXT NOT NULL,
    billable BOOLEAN NOT NULL DEFAULT FALSE,
    approved BOOLEAN NOT NULL DEFAULT FALSE,
    reimbursed BOOLEAN NOT NULL DEFAULT FALSE,
    expense_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SALES_ORDERS_SQL: &str = r"
CREATE TABLE sales_orders (
    id UUID PRIMARY KEY,
    number TEXT NOT NULL UNIQUE,
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    customer_id UUID,
    customer_name TEXT,
    status sales_order_status NOT NULL DEFAULT 'draft',
    total_amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL DEFAULT 'USD',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SALES_ORDER_LINES_SQL: &str = r"
CREATE TABLE sales_order_lines (
    id UUID PRIMARY KEY,
    so_id UUID NOT NULL REFERENCES sales_orders(id) ON DELETE CASCADE,
    product_id UUID,
    description TEXT NOT NULL,
    quantity NUMERIC(15, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(15, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0
);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY,
    number TEXT NOT NULL UNIQUE,
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    vendor_id UUID,
    vendor_name TEXT,
    status purchase_order_status NOT NULL DEFAULT 'draft',
    total_amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL DEFAULT 'USD',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PURCHASE_ORDER_LINES_SQL: &str = r"
CREATE TABLE purchase_order_lines (
    id UUID PRIMARY KEY,
    po_id UUID NOT NULL REFERENCES purchase_orders(id) ON DELETE CASCADE,
    product_id UUID,
    description TEXT NOT NULL,
    quantity NUMERIC(15, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(15, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0
);
";

const CUSTOMER_INVOICES_SQL: &str = r"
CREATE TABLE customer_invoices (
    id UUID PRIMARY KEY,
    number TEXT NOT NULL UNIQUE,
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    source_so_id UUID REFERENCES sales_orders(id) ON DELETE SET NULL,
    status invoice_status NOT NULL DEFAULT 'draft',
    total_amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL DEFAULT 'USD',
    due_date DATE,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Timesheets reference the invoice they were billed on
ALTER TABLE timesheets
    ADD CONSTRAINT timesheets_invoice_id_fkey
    FOREIGN KEY (invoice_id) REFERENCES customer_invoices(id) ON DELETE SET NULL;
";

const INVOICE_LINES_SQL: &str = r"
CREATE TABLE invoice_lines (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES customer_invoices(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    quantity NUMERIC(15, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(15, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    timesheet_id UUID REFERENCES timesheets(id) ON DELETE SET NULL,
    expense_id UUID REFERENCES expenses(id) ON DELETE SET NULL
);
";

const VENDOR_BILLS_SQL: &str = r"
CREATE TABLE vendor_bills (
    id UUID PRIMARY KEY,
    number TEXT NOT NULL UNIQUE,
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    source_po_id UUID REFERENCES purchase_orders(id) ON DELETE SET NULL,
    vendor_id UUID,
    vendor_name TEXT,
    status vendor_bill_status NOT NULL DEFAULT 'draft',
    total_amount NUMERIC(15, 4) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL DEFAULT 'USD',
    due_date DATE,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const BILL_LINES_SQL: &str = r"
CREATE TABLE bill_lines (
    id UUID PRIMARY KEY,
    bill_id UUID NOT NULL REFERENCES vendor_bills(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    quantity NUMERIC(15, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(15, 4) NOT NULL DEFAULT 0,
    amount NUMERIC(15, 4) NOT NULL DEFAULT 0
);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id UUID PRIMARY KEY,
    action TEXT NOT NULL,
    entity_type TEXT NOT NULL,
    entity_id UUID NOT NULL,
    details TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_tasks_project ON tasks(project_id);
CREATE INDEX idx_timesheets_project ON timesheets(project_id);
CREATE INDEX idx_timesheets_invoice ON timesheets(invoice_id);
-- Candidate set for invoice derivation
CREATE INDEX idx_timesheets_uninvoiced
    ON timesheets(project_id, work_date)
    WHERE status = 'approved' AND NOT invoiced;
CREATE INDEX idx_expenses_project ON expenses(project_id);
CREATE INDEX idx_sales_orders_project ON sales_orders(project_id);
CREATE INDEX idx_sales_order_lines_so ON sales_order_lines(so_id);
CREATE INDEX idx_purchase_orders_project ON purchase_orders(project_id);
CREATE INDEX idx_purchase_order_lines_po ON purchase_order_lines(po_id);
CREATE INDEX idx_customer_invoices_project ON customer_invoices(project_id);
CREATE INDEX idx_customer_invoices_source_so ON customer_invoices(source_so_id);
CREATE INDEX idx_invoice_lines_invoice ON invoice_lines(invoice_id);
CREATE INDEX idx_invoice_lines_timesheet ON invoice_lines(timesheet_id);
CREATE INDEX idx_vendor_bills_project ON vendor_bills(project_id);
-- At most one bill per purchase order
CREATE UNIQUE INDEX idx_vendor_bills_source_po
    ON vendor_bills(source_po_id)
    WHERE source_po_id IS NOT NULL;
CREATE INDEX idx_bill_lines_bill ON bill_lines(bill_id);
CREATE INDEX idx_audit_logs_entity ON audit_logs(entity_type, entity_id);
CREATE INDEX idx_audit_logs_created ON audit_logs(created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS audit_logs CASCADE;
DROP TABLE IF EXISTS bill_lines CASCADE;
DROP TABLE IF EXISTS vendor_bills CASCADE;
DROP TABLE IF EXISTS invoice_lines CASCADE;
DROP TABLE IF EXISTS customer_invoices CASCADE;
DROP TABLE IF EXISTS purchase_order_lines CASCADE;
DROP TABLE IF EXISTS purchase_orders CASCADE;
DROP TABLE IF EXISTS sales_order_lines CASCADE;
DROP TABLE IF EXISTS sales_orders CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS timesheets CASCADE;
DROP TABLE IF EXISTS tasks CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS vendor_bill_status;
DROP TYPE IF EXISTS purchase_order_status;
DROP TYPE IF EXISTS sales_order_status;
DROP TYPE IF EXISTS timesheet_status;
";
