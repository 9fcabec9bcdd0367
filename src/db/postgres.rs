use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use crate::db::{query, EmployeeStore};
use crate::errors::AppResult;
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::listing::{EmployeePage, ListMeta, ListParams};

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO employees ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            query::EMPLOYEE_COLUMNS,
            query::EMPLOYEE_COLUMNS
        );

        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_employee.name)
            .bind(&new_employee.email)
            .bind(&new_employee.department)
            .bind(&new_employee.designation)
            .bind(new_employee.salary.unwrap_or(0.0))
            .bind(new_employee.joining_date)
            .bind(new_employee.status.unwrap_or_default())
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", query::EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn update(&self, id: Uuid, update: EmployeeUpdate) -> AppResult<Option<Employee>> {
        let mut builder = query::update_employee(id, &update, Utc::now());
        let employee = builder
            .build_query_as::<Employee>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, params: &ListParams) -> AppResult<EmployeePage> {
        let mut page_query = query::select_page(params);
        let mut count_query = query::count_matching(params);

        let (data, total) = tokio::try_join!(
            page_query.build_query_as::<Employee>().fetch_all(&self.pool),
            count_query.build_query_scalar::<i64>().fetch_one(&self.pool),
        )?;

        Ok(EmployeePage {
            data,
            meta: ListMeta::new(total, params.page, params.limit),
        })
    }
}
