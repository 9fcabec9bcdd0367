use std::collections::BTreeMap;
use std::time::Duration;
use chrono::NaiveDate;
use uuid::Uuid;
use crate::client::{ClientError, ClientResult, EmployeeApi};
use crate::models::employee::{Employee, EmployeeStatus, EmployeeUpdate, NewEmployee};

/// How long the success banner stays up before returning to the list.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
pub const LIST_ROUTE: &str = "/";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Raw input values as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub salary: String,
    pub joining_date: String,
    pub status: EmployeeStatus,
}

impl From<&Employee> for FormFields {
    fn from(employee: &Employee) -> Self {
        FormFields {
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone().unwrap_or_default(),
            designation: employee.designation.clone().unwrap_or_default(),
            salary: employee.salary.to_string(),
            joining_date: employee
                .joining_date
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            status: employee.status,
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Form values after client-side checks, ready to become either payload.
struct Checked {
    name: String,
    email: String,
    department: Option<String>,
    designation: Option<String>,
    salary: Option<f64>,
    joining_date: Option<NaiveDate>,
    status: EmployeeStatus,
}

/// Create/edit form. The route's id parameter decides the mode.
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    pub mode: FormMode,
    pub fields: FormFields,
    pub field_errors: BTreeMap<&'static str, String>,
    pub error: Option<String>,
    pub loading: bool,
    pub success: bool,
}

impl EmployeeForm {
    pub fn new(mode: FormMode) -> Self {
        EmployeeForm {
            mode,
            fields: FormFields::default(),
            field_errors: BTreeMap::new(),
            error: None,
            loading: false,
            success: false,
        }
    }

    /// `None` is the add route; `Some(id)` is `/edit/{id}`.
    pub fn for_route(id: Option<&str>) -> ClientResult<Self> {
        match id {
            None => Ok(Self::new(FormMode::Create)),
            Some(raw) => Uuid::parse_str(raw)
                .map(|id| Self::new(FormMode::Edit(id)))
                .map_err(|_| ClientError::NotFound("Employee not found".to_string())),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Employee"
        } else {
            "Add New Employee"
        }
    }

    /// Fills the fields from the stored record when editing.
    pub async fn load(&mut self, api: &dyn EmployeeApi) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };

        self.loading = true;
        match api.get(id).await {
            Ok(employee) => self.fields = FormFields::from(&employee),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    fn check(&mut self) -> Option<Checked> {
        self.field_errors.clear();
        let fields = &self.fields;

        let name = fields.name.trim().to_string();
        if name.is_empty() {
            self.field_errors.insert("name", "Name is required".to_string());
        }

        let email = fields.email.trim().to_string();
        if email.is_empty() {
            self.field_errors.insert("email", "Email is required".to_string());
        } else if !validator::validate_email(email.as_str()) || !has_dotted_domain(&email) {
            self.field_errors.insert("email", "Invalid email address".to_string());
        }

        let salary = match fields.salary.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(value) if value >= 0.0 => Some(value),
                Ok(_) => {
                    self.field_errors.insert("salary", "Salary must be positive".to_string());
                    None
                }
                Err(_) => {
                    self.field_errors.insert("salary", "Salary must be a number".to_string());
                    None
                }
            },
        };

        let joining_date = match fields.joining_date.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    self.field_errors.insert("joining_date", "Invalid date".to_string());
                    None
                }
            },
        };

        if !self.field_errors.is_empty() {
            return None;
        }

        Some(Checked {
            name,
            email,
            department: optional_text(&fields.department),
            designation: optional_text(&fields.designation),
            salary,
            joining_date,
            status: fields.status,
        })
    }

    /// Runs client-side validation only; errors land in `field_errors`.
    pub fn validate(&mut self) -> bool {
        self.check().is_some()
    }

    /// Validates, then creates or updates. Returns the saved record; the caller
    /// navigates to [`LIST_ROUTE`] after [`SUCCESS_REDIRECT_DELAY`].
    pub async fn submit(&mut self, api: &dyn EmployeeApi) -> Option<Employee> {
        let checked = self.check()?;

        self.loading = true;
        self.error = None;
        let result = match self.mode {
            FormMode::Create => {
                let payload = NewEmployee {
                    name: checked.name,
                    email: checked.email,
                    department: checked.department,
                    designation: checked.designation,
                    salary: checked.salary,
                    joining_date: checked.joining_date,
                    status: Some(checked.status),
                };
                api.create(&payload).await
            }
            FormMode::Edit(id) => {
                let payload = EmployeeUpdate {
                    name: Some(checked.name),
                    email: Some(checked.email),
                    department: Some(checked.department),
                    designation: Some(checked.designation),
                    salary: Some(checked.salary.unwrap_or(0.0)),
                    joining_date: Some(checked.joining_date),
                    status: Some(checked.status),
                };
                api.update(id, &payload).await
            }
        };
        self.loading = false;

        match result {
            Ok(employee) => {
                self.success = true;
                Some(employee)
            }
            Err(err) => {
                log::warn!("Failed to save employee: {}", err);
                self.error = Some(err.to_string());
                None
            }
        }
    }
}

/// The domain must end in a label of at least two letters, after a non-empty label.
fn has_dotted_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((head, tld)) => {
            !head.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;
    use crate::db::EmployeeStore;

    fn filled(name: &str, email: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn route_decides_mode() {
        assert_eq!(EmployeeForm::for_route(None).unwrap().mode, FormMode::Create);

        let id = Uuid::new_v4();
        let form = EmployeeForm::for_route(Some(&id.to_string())).unwrap();
        assert_eq!(form.mode, FormMode::Edit(id));
        assert_eq!(form.title(), "Edit Employee");

        assert!(EmployeeForm::for_route(Some("abc")).is_err());
    }

    #[test]
    fn client_side_validation_flags_each_field() {
        let mut form = EmployeeForm::new(FormMode::Create);
        form.fields.salary = "-10".to_string();
        assert!(!form.validate());
        assert_eq!(form.field_errors["name"], "Name is required");
        assert_eq!(form.field_errors["email"], "Email is required");
        assert_eq!(form.field_errors["salary"], "Salary must be positive");

        form.fields = filled("Alice", "not-an-email");
        assert!(!form.validate());
        assert_eq!(form.field_errors["email"], "Invalid email address");

        form.fields = filled("Alice", "alice@example.com");
        assert!(form.validate());
        assert!(form.field_errors.is_empty());
    }

    #[test]
    fn email_needs_a_top_level_domain() {
        let mut form = EmployeeForm::new(FormMode::Create);
        for email in ["a@b", "a@b.c", "a@.co", "a@b.c0"] {
            form.fields = filled("Alice", email);
            assert!(!form.validate(), "{} accepted", email);
            assert_eq!(form.field_errors["email"], "Invalid email address");
        }

        form.fields = filled("Alice", "a@b.co");
        assert!(form.validate());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_api() {
        let api = FakeApi::default();
        let mut form = EmployeeForm::new(FormMode::Create);

        assert!(form.submit(&api).await.is_none());
        let page = api.store.list(&Default::default()).await.unwrap();
        assert_eq!(page.meta.total, 0);
    }

    #[tokio::test]
    async fn create_submits_and_marks_success() {
        let api = FakeApi::default();
        let mut form = EmployeeForm::new(FormMode::Create);
        form.fields = FormFields {
            salary: "42000".to_string(),
            joining_date: "2023-07-01".to_string(),
            department: "  ".to_string(),
            ..filled(" Alice ", "alice@example.com")
        };

        let saved = form.submit(&api).await.unwrap();
        assert!(form.success);
        assert_eq!(saved.name, "Alice");
        assert_eq!(saved.salary, 42000.0);
        assert_eq!(saved.department, None);
        assert_eq!(saved.joining_date, NaiveDate::from_ymd_opt(2023, 7, 1));
    }

    #[tokio::test]
    async fn edit_preloads_record_with_date_input_format() {
        let api = FakeApi::default();
        let created = api
            .store
            .create(NewEmployee {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                salary: Some(1500.0),
                joining_date: NaiveDate::from_ymd_opt(2021, 1, 5),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut form = EmployeeForm::new(FormMode::Edit(created.id));
        form.load(&api).await;
        assert_eq!(form.fields.joining_date, "2021-01-05");
        assert_eq!(form.fields.salary, "1500");
        assert_eq!(form.fields.name, "Bob");

        form.fields.designation = "Lead".to_string();
        let saved = form.submit(&api).await.unwrap();
        assert_eq!(saved.designation.as_deref(), Some("Lead"));
        assert_eq!(saved.email, "bob@example.com");
    }

    #[tokio::test]
    async fn edit_can_clear_optional_fields() {
        let api = FakeApi::default();
        let created = api
            .store
            .create(NewEmployee {
                name: "Cara".to_string(),
                email: "cara@example.com".to_string(),
                department: Some("Sales".to_string()),
                designation: Some("Lead".to_string()),
                salary: Some(900.0),
                joining_date: NaiveDate::from_ymd_opt(2020, 2, 2),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut form = EmployeeForm::new(FormMode::Edit(created.id));
        form.load(&api).await;
        form.fields.designation = String::new();
        form.fields.joining_date = " ".to_string();
        form.fields.salary = String::new();

        let saved = form.submit(&api).await.unwrap();
        assert_eq!(saved.designation, None);
        assert_eq!(saved.joining_date, None);
        assert_eq!(saved.salary, 0.0);
        assert_eq!(saved.department.as_deref(), Some("Sales"));
    }

    #[tokio::test]
    async fn server_error_is_shown_verbatim() {
        let api = FakeApi::default();
        api.seed("Alice", "alice@example.com", None).await;

        let mut form = EmployeeForm::new(FormMode::Create);
        form.fields = filled("Another", "alice@example.com");
        assert!(form.submit(&api).await.is_none());
        assert!(!form.success);
        assert_eq!(
            form.error.as_deref(),
            Some("Email 'alice@example.com' is already in use")
        );
    }
}
