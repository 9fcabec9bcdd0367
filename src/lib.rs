pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;
use crate::config::AppConfig;

const CORS_MAX_AGE_SECS: usize = 3600;

/// CORS policy for the browser client. With no configured origins every origin
/// is accepted.
pub fn cors(config: &AppConfig) -> Cors {
    if config.cors_allowed_origins.is_empty() {
        return Cors::permissive();
    }

    config
        .cors_allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE_SECS)
}

/// Mounts the JSON API under `/api`. Expects a `web::Data<dyn db::EmployeeStore>`
/// to be registered on the `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(utils::validation::json_config())
        .app_data(utils::validation::query_config())
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health::health_check))
                .service(
                    web::resource("/employees")
                        .route(web::get().to(handlers::employee::get_employees))
                        .route(web::post().to(handlers::employee::create_employee)),
                )
                .service(
                    web::resource("/employees/{id}")
                        .route(web::get().to(handlers::employee::get_employee))
                        .route(web::put().to(handlers::employee::update_employee))
                        .route(web::delete().to(handlers::employee::delete_employee)),
                ),
        );
}
