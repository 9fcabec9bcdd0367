use chrono::NaiveDate;
use uuid::Uuid;
use crate::client::EmployeeApi;
use crate::models::employee::Employee;
use crate::models::listing::{ListQuery, SortColumn, SortDirection};

pub const PAGE_SIZE: i64 = 10;
const NOT_AVAILABLE: &str = "N/A";

/// State behind the employee table: filters, sort, the loaded rows and the
/// row-level dialogs. Every filter or sort change reloads from page 1.
#[derive(Debug, Clone)]
pub struct EmployeeListView {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    page: i64,
    search: String,
    department: String,
    designation: String,
    sort_by: SortColumn,
    sort_dir: SortDirection,
    departments: Vec<String>,
    designations: Vec<String>,
    viewing: Option<Employee>,
    pending_delete: Option<Employee>,
}

impl Default for EmployeeListView {
    fn default() -> Self {
        EmployeeListView {
            employees: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            page: 1,
            search: String::new(),
            department: String::new(),
            designation: String::new(),
            sort_by: SortColumn::CreatedAt,
            sort_dir: SortDirection::Desc,
            departments: Vec::new(),
            designations: Vec::new(),
            viewing: None,
            pending_delete: None,
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.flatten() {
        if !value.is_empty() && !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

impl EmployeeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn sort(&self) -> (SortColumn, SortDirection) {
        (self.sort_by, self.sort_dir)
    }

    /// Dropdown options, taken from the first page of the current result set only.
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn designations(&self) -> &[String] {
        &self.designations
    }

    pub fn viewing(&self) -> Option<&Employee> {
        self.viewing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&Employee> {
        self.pending_delete.as_ref()
    }

    fn query_for(&self, page: i64) -> ListQuery {
        ListQuery {
            q: Some(self.search.clone()),
            department: Some(self.department.clone()),
            designation: Some(self.designation.clone()),
            sort_by: Some(self.sort_by.as_column().to_string()),
            sort_dir: Some(self.sort_dir.as_param().to_string()),
            page: Some(page.to_string()),
            limit: Some(PAGE_SIZE.to_string()),
        }
    }

    async fn load(&mut self, api: &dyn EmployeeApi, page: i64, reset: bool) {
        self.loading = true;
        self.error = None;

        match api.list(&self.query_for(page)).await {
            Ok(result) => {
                self.has_more = result.data.len() as i64 == PAGE_SIZE;
                if page == 1 {
                    self.departments = distinct(result.data.iter().map(|e| e.department.as_ref()));
                    self.designations = distinct(result.data.iter().map(|e| e.designation.as_ref()));
                }
                if reset {
                    self.employees = result.data;
                } else {
                    self.employees.extend(result.data);
                }
                self.page = page;
            }
            Err(err) => {
                log::warn!("Failed to load employees: {}", err);
                self.error = Some(err.to_string());
            }
        }

        self.loading = false;
    }

    /// Replaces the rows with page 1 of the current filters.
    pub async fn refresh(&mut self, api: &dyn EmployeeApi) {
        self.page = 1;
        self.employees.clear();
        self.has_more = true;
        self.load(api, 1, true).await;
    }

    /// Appends the next page. No-op while a request is running or when the
    /// last page came back short.
    pub async fn load_more(&mut self, api: &dyn EmployeeApi) {
        if self.loading || !self.has_more {
            return;
        }
        let next = self.page + 1;
        self.load(api, next, false).await;
    }

    pub async fn set_search(&mut self, api: &dyn EmployeeApi, query: &str) {
        if self.search != query {
            self.search = query.to_string();
            self.refresh(api).await;
        }
    }

    pub async fn set_department(&mut self, api: &dyn EmployeeApi, department: &str) {
        if self.department != department {
            self.department = department.to_string();
            self.refresh(api).await;
        }
    }

    pub async fn set_designation(&mut self, api: &dyn EmployeeApi, designation: &str) {
        if self.designation != designation {
            self.designation = designation.to_string();
            self.refresh(api).await;
        }
    }

    /// Clicking the active column flips direction; a new column starts ascending.
    pub async fn sort_by(&mut self, api: &dyn EmployeeApi, column: SortColumn) {
        if self.sort_by == column {
            self.sort_dir = self.sort_dir.toggled();
        } else {
            self.sort_by = column;
            self.sort_dir = SortDirection::Asc;
        }
        self.refresh(api).await;
    }

    pub fn sort_indicator(&self, column: SortColumn) -> &'static str {
        if self.sort_by != column {
            return "↕";
        }
        match self.sort_dir {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }

    pub fn view(&mut self, id: Uuid) {
        self.viewing = self.employees.iter().find(|e| e.id == id).cloned();
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    pub fn edit_route(id: Uuid) -> String {
        format!("/edit/{}", id)
    }

    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = self.employees.iter().find(|e| e.id == id).cloned();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn delete_prompt(&self) -> Option<String> {
        self.pending_delete.as_ref().map(|e| {
            format!(
                "Are you sure you want to delete {}? This action cannot be undone.",
                e.name
            )
        })
    }

    /// Deletes the row awaiting confirmation and drops it from the loaded set.
    pub async fn confirm_delete(&mut self, api: &dyn EmployeeApi) {
        let Some(target) = self.pending_delete.clone() else {
            return;
        };

        match api.delete(target.id).await {
            Ok(()) => {
                self.employees.retain(|e| e.id != target.id);
                self.pending_delete = None;
            }
            Err(err) => {
                log::warn!("Failed to delete employee {}: {}", target.id, err);
                self.error = Some(err.to_string());
            }
        }
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_text(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Rupee amount with Indian digit grouping (`₹12,34,567.00`); zero shows as `N/A`.
pub fn format_salary(amount: f64) -> String {
    if amount == 0.0 || !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}₹{}.{}", sign, grouped, fraction)
}
