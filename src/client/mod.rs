//! Typed client for the employee API plus the view-models that drive it.

pub mod form_view;
pub mod http;
pub mod list_view;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::listing::{EmployeePage, ListQuery};

pub use form_view::{EmployeeForm, FormMode};
pub use http::EmployeeClient;
pub use list_view::EmployeeListView;

/// Display text is the server's message, verbatim where one was sent.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Server(String),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> ClientResult<EmployeePage>;
    async fn get(&self, id: Uuid) -> ClientResult<Employee>;
    async fn create(&self, payload: &NewEmployee) -> ClientResult<Employee>;
    async fn update(&self, id: Uuid, payload: &EmployeeUpdate) -> ClientResult<Employee>;
    async fn delete(&self, id: Uuid) -> ClientResult<()>;
}
