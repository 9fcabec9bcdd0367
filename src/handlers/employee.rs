use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde_json::json;
use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{EmployeeUpdate, NewEmployee};
use crate::models::listing::{ListParams, ListQuery};
use crate::utils::validation::{parse_employee_id, validate_payload};

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let new_employee = new_employee.into_inner().normalized();
    validate_payload(&new_employee)?;

    let employee = store.create(new_employee).await?;
    info!("Created employee {}", employee.id);

    Ok(HttpResponse::Created().json(employee))
}

pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = parse_employee_id(&employee_id)?;

    match store.find_by_id(employee_id).await? {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => {
            warn!("Employee {} not found", employee_id);
            Err(AppError::employee_not_found())
        }
    }
}

pub async fn get_employees(
    store: web::Data<dyn EmployeeStore>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let params = ListParams::from(query.into_inner());
    let page = store.list(&params).await?;

    info!(
        "Listed {} of {} employees (page {}, limit {})",
        page.data.len(),
        page.meta.total,
        page.meta.page,
        page.meta.limit
    );
    Ok(HttpResponse::Ok().json(page))
}

pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<String>,
    updates: web::Json<EmployeeUpdate>,
) -> Result<HttpResponse, AppError> {
    let employee_id = parse_employee_id(&employee_id)?;
    let updates = updates.into_inner().normalized();
    validate_payload(&updates)?;

    match store.update(employee_id, updates).await? {
        Some(employee) => {
            info!("Updated employee {}", employee_id);
            Ok(HttpResponse::Ok().json(employee))
        }
        None => {
            warn!("Cannot update missing employee {}", employee_id);
            Err(AppError::employee_not_found())
        }
    }
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee_id = parse_employee_id(&employee_id)?;

    if !store.delete(employee_id).await? {
        warn!("Cannot delete missing employee {}", employee_id);
        return Err(AppError::employee_not_found());
    }

    info!("Deleted employee {}", employee_id);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
