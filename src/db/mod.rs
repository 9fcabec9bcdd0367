pub mod memory;
pub mod postgres;
pub mod query;

use std::sync::Arc;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::listing::{EmployeePage, ListParams};

pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

/// Storage for employee records. Payloads arrive already trimmed and validated.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, new_employee: NewEmployee) -> AppResult<Employee>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>>;
    /// `Ok(None)` when no record has this id.
    async fn update(&self, id: Uuid, update: EmployeeUpdate) -> AppResult<Option<Employee>>;
    /// `Ok(false)` when no record has this id.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn list(&self, params: &ListParams) -> AppResult<EmployeePage>;
}

const SCHEMA: [&str; 3] = [
    r#"
    DO $$ BEGIN
        CREATE TYPE employee_status AS ENUM ('Active', 'Inactive');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        department TEXT,
        designation TEXT,
        salary DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (salary >= 0),
        joining_date DATE,
        status employee_status NOT NULL DEFAULT 'Active',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS employees_created_at_idx ON employees (created_at)",
];

pub async fn create_pool(config: &AppConfig) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|err| AppError::DatabaseError(format!("Failed to connect to the database: {}", err)))
}

/// Creates the `employees` table and its enum type when missing.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn connect(config: &AppConfig) -> AppResult<Arc<dyn EmployeeStore>> {
    if config.uses_memory_store() {
        log::warn!("Using in-memory employee store; records are lost on shutdown");
        return Ok(Arc::new(MemoryEmployeeStore::new()));
    }

    let pool = create_pool(config).await?;
    init_schema(&pool).await?;
    log::info!("Connected to the database");
    Ok(Arc::new(PgEmployeeStore::new(pool)))
}
