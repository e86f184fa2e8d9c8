use crate::types::error::AppError;
use crate::utils::webutils::validate_token;
use actix_web::{middleware::from_fn, web};

pub mod auth;
pub mod health;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("invalid data: {err}")).into()
    }));

    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/register").service(auth::register::register)
    );
    cfg.service(
        web::scope("/login").service(auth::login::login)
    );
    cfg.service(
        web::scope("/user")
            .service(user::profile::profile)
            .service(user::edit::edit)
            .wrap(from_fn(validate_token))
    );
}
