use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use user_service::config::EnvConfig;
use user_service::db::postgres_service::PostgresService;
use user_service::routes::configure_routes;
use user_service::service::{UserService, UserServiceOptions};
use user_service::utils::password::BcryptPasswordManager;
use user_service::utils::token::JwtTokenService;
use user_service::utils::validation::RequestValidator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    // bad key material is fatal before anything listens
    let tokens = JwtTokenService::from_files(
        &config.keys.private_key_path,
        &config.keys.public_key_path,
    )
    .expect("Failed to load signing keys");

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );

    let service = web::Data::new(UserService::new(UserServiceOptions {
        users: postgres_service,
        passwords: Arc::new(BcryptPasswordManager::new(config.password.clone())),
        tokens: Arc::new(tokens),
        validator: RequestValidator::new(config.validation.clone()),
        token_expiry_hours: config.token_expiry_hours,
    }));

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
