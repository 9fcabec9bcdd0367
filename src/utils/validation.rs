use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};
use uuid::Uuid;
use validator::Validate;
use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

/// Ids that are not UUIDs cannot name a stored record.
pub fn parse_employee_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::employee_not_found())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON payload: {}", err);
    AppError::Validation(format!("Invalid request body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query string: {}", err);
    AppError::Validation(format!("Invalid query string: {}", err)).into()
}

/// Extractor failures answer with the same `{ "error": ... }` body as handler errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_reported_as_not_found() {
        assert!(matches!(parse_employee_id("not-a-uuid"), Err(AppError::NotFound(_))));

        let id = Uuid::new_v4();
        assert_eq!(parse_employee_id(&id.to_string()).unwrap(), id);
    }
}
