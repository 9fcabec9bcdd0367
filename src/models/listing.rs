use serde::{Deserialize, Serialize};
use crate::models::employee::Employee;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw query string of `GET /employees`. Numbers are kept as text so that
/// malformed values fall back to defaults instead of rejecting the request.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    Name,
    Email,
    Department,
    Designation,
    Salary,
    JoiningDate,
    Status,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    /// Unknown columns fall back to `created_at`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name") => SortColumn::Name,
            Some("email") => SortColumn::Email,
            Some("department") => SortColumn::Department,
            Some("designation") => SortColumn::Designation,
            Some("salary") => SortColumn::Salary,
            Some("joining_date") => SortColumn::JoiningDate,
            Some("status") => SortColumn::Status,
            Some("updated_at") => SortColumn::UpdatedAt,
            _ => SortColumn::CreatedAt,
        }
    }

    pub fn as_column(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Email => "email",
            SortColumn::Department => "department",
            SortColumn::Designation => "designation",
            SortColumn::Salary => "salary",
            SortColumn::JoiningDate => "joining_date",
            SortColumn::Status => "status",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only the exact string `asc` ascends.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Validated listing parameters handed to the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub q: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub sort_by: SortColumn,
    pub sort_dir: SortDirection,
    pub page: i64,
    pub limit: i64,
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            q: None,
            department: None,
            designation: None,
            sort_by: SortColumn::default(),
            sort_dir: SortDirection::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListParams {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<ListQuery> for ListParams {
    fn from(query: ListQuery) -> Self {
        ListParams {
            q: non_blank(query.q),
            department: non_blank(query.department),
            designation: non_blank(query.designation),
            sort_by: SortColumn::parse(query.sort_by.as_deref()),
            sort_dir: SortDirection::parse(query.sort_dir.as_deref()),
            page: parse_at_least_one(query.page.as_deref(), DEFAULT_PAGE),
            limit: parse_at_least_one(query.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unparseable input yields `default`; parsed values are clamped to >= 1.
fn parse_at_least_one(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .map(|v| v.max(1))
        .unwrap_or(default)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl ListMeta {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let limit = limit.max(1);
        ListMeta {
            total,
            page,
            limit,
            pages: total / limit + i64::from(total % limit != 0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmployeePage {
    pub data: Vec<Employee>,
    pub meta: ListMeta,
}
