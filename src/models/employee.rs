use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(type_name = "employee_status")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub salary: f64,
    pub joining_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /employees`. Missing `name`/`email` deserialize to an empty
/// string so they surface as validation errors rather than parse errors.
#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq)]
pub struct NewEmployee {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl NewEmployee {
    /// Trims text fields; blank optional text becomes `None`.
    pub fn normalized(self) -> Self {
        NewEmployee {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: trim_optional(self.department),
            designation: trim_optional(self.designation),
            ..self
        }
    }
}

/// Body of `PUT /employees/{id}`. Absent fields are left untouched.
///
/// The optional columns are `Option<Option<_>>`: the outer `None` means the key
/// was absent, `Some(None)` means it was sent as `null` (or blank text) and
/// clears the stored value.
#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub department: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub designation: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub joining_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    pub fn normalized(self) -> Self {
        EmployeeUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| e.trim().to_string()),
            department: self.department.map(trim_optional),
            designation: self.designation.map(trim_optional),
            ..self
        }
    }

    /// Applies the supplied fields onto `employee`, leaving the rest as they were.
    pub fn apply_to(&self, employee: &mut Employee, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
        if let Some(designation) = &self.designation {
            employee.designation = designation.clone();
        }
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(joining_date) = self.joining_date {
            employee.joining_date = joining_date;
        }
        if let Some(status) = self.status {
            employee.status = status;
        }
        employee.updated_at = now;
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_fail_validation() {
        let payload: NewEmployee = serde_json::from_str(r#"{"department":"Sales"}"#).unwrap();
        let errors = payload.normalized().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn whitespace_only_name_is_rejected_after_trim() {
        let payload = NewEmployee {
            name: "   ".to_string(),
            email: "a@b.com".to_string(),
            ..Default::default()
        };
        assert!(payload.normalized().validate().is_err());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let update = EmployeeUpdate {
            salary: Some(-1.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn normalized_trims_and_drops_blank_optionals() {
        let payload = NewEmployee {
            name: "  Alice ".to_string(),
            email: " alice@example.com ".to_string(),
            department: Some("   ".to_string()),
            designation: Some(" Engineer ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(payload.name, "Alice");
        assert_eq!(payload.email, "alice@example.com");
        assert_eq!(payload.department, None);
        assert_eq!(payload.designation.as_deref(), Some("Engineer"));
    }

    #[test]
    fn update_distinguishes_absent_from_cleared() {
        let update: EmployeeUpdate =
            serde_json::from_str(r#"{"department":null,"designation":"  ","joining_date":null}"#).unwrap();
        let update = update.normalized();
        assert_eq!(update.department, Some(None));
        assert_eq!(update.designation, Some(None));
        assert_eq!(update.joining_date, Some(None));

        let untouched: EmployeeUpdate = serde_json::from_str(r#"{"name":"Dana"}"#).unwrap();
        assert_eq!(untouched.department, None);
        assert_eq!(untouched.joining_date, None);
    }

    #[test]
    fn apply_to_clears_explicitly_nulled_fields() {
        let now = Utc::now();
        let mut employee = Employee {
            id: Uuid::new_v4(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            department: Some("Sales".to_string()),
            designation: Some("Lead".to_string()),
            salary: 100.0,
            joining_date: NaiveDate::from_ymd_opt(2021, 3, 1),
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        };

        EmployeeUpdate {
            department: Some(None),
            joining_date: Some(None),
            ..Default::default()
        }
        .apply_to(&mut employee, now);

        assert_eq!(employee.department, None);
        assert_eq!(employee.joining_date, None);
        assert_eq!(employee.designation.as_deref(), Some("Lead"));
    }

    #[test]
    fn status_uses_capitalized_wire_names() {
        let status: EmployeeStatus = serde_json::from_str(r#""Inactive""#).unwrap();
        assert_eq!(status, EmployeeStatus::Inactive);
        assert!(serde_json::from_str::<EmployeeStatus>(r#""inactive""#).is_err());
        assert_eq!(EmployeeStatus::default().as_str(), "Active");
    }
}
