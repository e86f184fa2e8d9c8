use actix_web::{web, App};
use std::sync::Arc;
use user_service::config::ValidationConfig;
use user_service::db::user::UserRepository;
use user_service::service::{UserService, UserServiceOptions};
use user_service::types::token::TokenSubject;
use user_service::types::user::RUserRegister;
use user_service::utils::password::PasswordManager;
use user_service::utils::token::{JwtTokenService, TokenService};
use user_service::utils::validation::RequestValidator;

use super::doubles::{MemoryUsers, PlainPasswords};

pub const TEST_PASSWORD: &str = "@Python12345@";

pub fn fixture_tokens() -> JwtTokenService {
    JwtTokenService::from_pem(
        include_bytes!("../fixtures/private_key.pem"),
        include_bytes!("../fixtures/public_key.pem"),
    )
    .expect("Failed to load fixture keys")
}

pub fn foreign_tokens() -> JwtTokenService {
    JwtTokenService::from_pem(
        include_bytes!("../fixtures/other_private_key.pem"),
        include_bytes!("../fixtures/other_public_key.pem"),
    )
    .expect("Failed to load fixture keys")
}

pub struct TestClient {
    pub service: web::Data<UserService>,
    pub tokens: Arc<dyn TokenService>,
}

impl TestClient {
    /// In-memory storage, plain passwords, real RS256 tokens.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(MemoryUsers::default()),
            Arc::new(PlainPasswords::default()),
            Arc::new(fixture_tokens()),
        )
    }

    pub fn with_parts(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordManager>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        let service = web::Data::new(UserService::new(UserServiceOptions {
            users,
            passwords,
            tokens: Arc::clone(&tokens),
            validator: RequestValidator::new(ValidationConfig::default()),
            token_expiry_hours: 9,
        }));
        TestClient { service, tokens }
    }

    #[allow(dead_code)]
    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.service.clone())
            .configure(user_service::routes::configure_routes)
    }

    /// Registers a user straight through the service and returns a live token for it.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, phone_number: &str) -> (i64, String) {
        let user_id = self
            .service
            .register_new_user(RUserRegister {
                phone_number: phone_number.to_string(),
                full_name: "Test User".to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to create test user");

        (user_id, self.token_for(user_id, 1))
    }

    #[allow(dead_code)]
    pub fn token_for(&self, user_id: i64, hours: i64) -> String {
        self.tokens
            .create_token(TokenSubject { subject_id: user_id }, hours)
            .expect("Failed to create token")
    }
}
