use std::cmp::Ordering;
use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::db::EmployeeStore;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::listing::{EmployeePage, ListMeta, ListParams, SortColumn, SortDirection};

/// Process-local store with the same filtering, ordering and uniqueness rules
/// as the Postgres schema. Selected with `DATABASE_URL=memory://`.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    employees: RwLock<HashMap<Uuid, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(employees: &HashMap<Uuid, Employee>, email: &str, except: Option<Uuid>) -> bool {
    employees
        .values()
        .any(|e| e.email == email && Some(e.id) != except)
}

fn matches_filters(employee: &Employee, params: &ListParams) -> bool {
    if let Some(q) = &params.q {
        let needle = q.to_lowercase();
        if !employee.name.to_lowercase().contains(&needle)
            && !employee.email.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(department) = &params.department {
        if employee.department.as_ref() != Some(department) {
            return false;
        }
    }
    if let Some(designation) = &params.designation {
        if employee.designation.as_ref() != Some(designation) {
            return false;
        }
    }
    true
}

// Case-folded first so text orders like a case-insensitive database collation;
// the raw string breaks ties between spellings.
fn collation_key(text: &str) -> (String, &str) {
    (text.to_lowercase(), text)
}

// Missing values sort last in both directions.
fn compare_optional<T: Ord>(a: Option<T>, b: Option<T>, dir: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), dir),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, dir: SortDirection) -> Ordering {
    match dir {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare(a: &Employee, b: &Employee, column: SortColumn, dir: SortDirection) -> Ordering {
    let primary = match column {
        SortColumn::Name => directed(collation_key(&a.name).cmp(&collation_key(&b.name)), dir),
        SortColumn::Email => directed(collation_key(&a.email).cmp(&collation_key(&b.email)), dir),
        SortColumn::Department => compare_optional(
            a.department.as_deref().map(collation_key),
            b.department.as_deref().map(collation_key),
            dir,
        ),
        SortColumn::Designation => compare_optional(
            a.designation.as_deref().map(collation_key),
            b.designation.as_deref().map(collation_key),
            dir,
        ),
        SortColumn::Salary => directed(a.salary.total_cmp(&b.salary), dir),
        SortColumn::JoiningDate => compare_optional(a.joining_date, b.joining_date, dir),
        SortColumn::Status => directed(a.status.as_str().cmp(b.status.as_str()), dir),
        SortColumn::CreatedAt => directed(a.created_at.cmp(&b.created_at), dir),
        SortColumn::UpdatedAt => directed(a.updated_at.cmp(&b.updated_at), dir),
    };
    primary.then_with(|| directed(a.id.cmp(&b.id), dir))
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, new_employee: NewEmployee) -> AppResult<Employee> {
        let mut employees = self.employees.write().await;
        if email_taken(&employees, &new_employee.email, None) {
            return Err(AppError::duplicate_email(&new_employee.email));
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            name: new_employee.name,
            email: new_employee.email,
            department: new_employee.department,
            designation: new_employee.designation,
            salary: new_employee.salary.unwrap_or(0.0),
            joining_date: new_employee.joining_date,
            status: new_employee.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, update: EmployeeUpdate) -> AppResult<Option<Employee>> {
        let mut employees = self.employees.write().await;
        if let Some(email) = &update.email {
            if email_taken(&employees, email, Some(id)) {
                return Err(AppError::duplicate_email(email));
            }
        }

        Ok(employees.get_mut(&id).map(|employee| {
            update.apply_to(employee, Utc::now());
            employee.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.employees.write().await.remove(&id).is_some())
    }

    async fn list(&self, params: &ListParams) -> AppResult<EmployeePage> {
        let employees = self.employees.read().await;
        let mut matching: Vec<&Employee> = employees.values().filter(|e| matches_filters(e, params)).collect();
        matching.sort_by(|a, b| compare(a, b, params.sort_by, params.sort_dir));

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(params.offset().max(0) as usize)
            .take(params.limit as usize)
            .cloned()
            .collect();

        Ok(EmployeePage {
            data,
            meta: ListMeta::new(total, params.page, params.limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(name: &str, email: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryEmployeeStore::new();
        store.create(new_employee("Alice", "alice@example.com")).await.unwrap();

        let err = store.create(new_employee("Other", "alice@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn updating_own_email_to_same_value_is_allowed() {
        let store = MemoryEmployeeStore::new();
        let alice = store.create(new_employee("Alice", "alice@example.com")).await.unwrap();

        let update = EmployeeUpdate {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let updated = store.update(alice.id, update).await.unwrap().unwrap();
        assert_eq!(updated.email, "alice@example.com");
        assert!(updated.updated_at >= alice.updated_at);
    }

    #[tokio::test]
    async fn missing_optional_values_sort_last() {
        let store = MemoryEmployeeStore::new();
        store.create(new_employee("NoDept", "nodept@example.com")).await.unwrap();
        for (name, dept) in [("B", "Sales"), ("A", "Engineering")] {
            let mut payload = new_employee(name, &format!("{}@example.com", name));
            payload.department = Some(dept.to_string());
            store.create(payload).await.unwrap();
        }

        for dir in [SortDirection::Asc, SortDirection::Desc] {
            let params = ListParams {
                sort_by: SortColumn::Department,
                sort_dir: dir,
                ..Default::default()
            };
            let page = store.list(&params).await.unwrap();
            assert_eq!(page.data.last().map(|e| e.name.as_str()), Some("NoDept"));
        }
    }

    #[tokio::test]
    async fn text_columns_sort_ignoring_case() {
        let store = MemoryEmployeeStore::new();
        for name in ["bob", "Alice", "carol"] {
            store.create(new_employee(name, &format!("{}@example.com", name))).await.unwrap();
        }

        let params = ListParams {
            sort_by: SortColumn::Name,
            sort_dir: SortDirection::Asc,
            ..Default::default()
        };
        let names: Vec<String> = store
            .list(&params)
            .await
            .unwrap()
            .data
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Alice", "bob", "carol"]);
    }
}
