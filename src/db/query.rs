use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;
use crate::models::employee::EmployeeUpdate;
use crate::models::listing::ListParams;

pub const EMPLOYEE_COLUMNS: &str =
    "id, name, email, department, designation, salary, joining_date, status, created_at, updated_at";

/// Escapes LIKE metacharacters so `q` is matched as a literal substring.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &ListParams) {
    let mut keyword = " WHERE ";

    if let Some(q) = &params.q {
        let pattern = format!("%{}%", escape_like(q));
        builder
            .push(keyword)
            .push("(name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
        keyword = " AND ";
    }
    if let Some(department) = &params.department {
        builder.push(keyword).push("department = ").push_bind(department.clone());
        keyword = " AND ";
    }
    if let Some(designation) = &params.designation {
        builder.push(keyword).push("designation = ").push_bind(designation.clone());
    }
}

/// One page of rows, ordered by the whitelisted column with `id` as tie-breaker.
pub fn select_page(params: &ListParams) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS));
    push_filters(&mut builder, params);

    let dir = params.sort_dir.as_sql();
    builder.push(format!(
        " ORDER BY {} {} NULLS LAST, id {}",
        params.sort_by.as_column(),
        dir,
        dir
    ));
    builder
        .push(" LIMIT ")
        .push_bind(params.limit)
        .push(" OFFSET ")
        .push_bind(params.offset());
    builder
}

/// Same filters as [`select_page`], without ordering or paging.
pub fn count_matching(params: &ListParams) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM employees");
    push_filters(&mut builder, params);
    builder
}

pub fn update_employee(
    id: Uuid,
    update: &EmployeeUpdate,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE employees SET ");
    let mut set = builder.separated(", ");

    if let Some(name) = &update.name {
        set.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(email) = &update.email {
        set.push("email = ").push_bind_unseparated(email.clone());
    }
    if let Some(department) = &update.department {
        set.push("department = ").push_bind_unseparated(department.clone());
    }
    if let Some(designation) = &update.designation {
        set.push("designation = ").push_bind_unseparated(designation.clone());
    }
    if let Some(salary) = update.salary {
        set.push("salary = ").push_bind_unseparated(salary);
    }
    if let Some(joining_date) = update.joining_date {
        set.push("joining_date = ").push_bind_unseparated(joining_date);
    }
    if let Some(status) = update.status {
        set.push("status = ").push_bind_unseparated(status);
    }
    set.push("updated_at = ").push_bind_unseparated(now);

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(format!(" RETURNING {}", EMPLOYEE_COLUMNS));
    builder
}
