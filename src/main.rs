use actix_web::{middleware, web, App, HttpServer};
use employee_manager::config::AppConfig;
use employee_manager::{configure_routes, cors, db};
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|err| {
        error!("Failed to load configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let store = db::connect(&config).await.map_err(|err| {
        error!("Failed to initialise storage: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;

    let address = config.bind_address();
    info!("Starting server at {}", address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(store.clone()))
            .wrap(cors(&config))
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(&address)?
    .run()
    .await
}
