use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;
use crate::client::{ClientError, ClientResult, EmployeeApi};
use crate::models::employee::{Employee, EmployeeUpdate, NewEmployee};
use crate::models::listing::{EmployeePage, ListQuery};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP implementation of [`EmployeeApi`] against a server rooted at `base_url`
/// (for example `http://127.0.0.1:5000/api`).
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    client: Client,
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(EmployeeClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(Into::into);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        log::debug!("Employee API answered {}: {}", status, message);

        Err(match status {
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server(message),
        })
    }
}

#[async_trait]
impl EmployeeApi for EmployeeClient {
    async fn list(&self, query: &ListQuery) -> ClientResult<EmployeePage> {
        let response = self.client.get(self.url("employees")).query(query).send().await?;
        Self::handle_response(response).await
    }

    async fn get(&self, id: Uuid) -> ClientResult<Employee> {
        let response = self.client.get(self.url(&format!("employees/{}", id))).send().await?;
        Self::handle_response(response).await
    }

    async fn create(&self, payload: &NewEmployee) -> ClientResult<Employee> {
        let response = self.client.post(self.url("employees")).json(payload).send().await?;
        Self::handle_response(response).await
    }

    async fn update(&self, id: Uuid, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        let response = self
            .client
            .put(self.url(&format!("employees/{}", id)))
            .json(payload)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let response = self.client.delete(self.url(&format!("employees/{}", id))).send().await?;
        Self::handle_response::<serde_json::Value>(response).await.map(|_| ())
    }
}
