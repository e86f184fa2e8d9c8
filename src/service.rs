use actix_web::web;
use entity::user::Model as UserModel;
use std::sync::Arc;
use tracing::{error, info};

use crate::db::user::UserRepository;
use crate::types::error::AppError;
use crate::types::token::TokenSubject;
use crate::types::user::{DBUserCreate, RUserEdit, RUserLogin, RUserRegister, UserFilter};
use crate::utils::password::PasswordManager;
use crate::utils::token::TokenService;
use crate::utils::validation::RequestValidator;

/// Account operations. Depends on storage, hashing and tokens only through
/// their traits.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordManager>,
    tokens: Arc<dyn TokenService>,
    validator: RequestValidator,
    token_expiry_hours: i64,
}

pub struct UserServiceOptions {
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordManager>,
    pub tokens: Arc<dyn TokenService>,
    pub validator: RequestValidator,
    pub token_expiry_hours: i64,
}

impl UserService {
    pub fn new(opts: UserServiceOptions) -> Self {
        Self {
            users: opts.users,
            passwords: opts.passwords,
            tokens: opts.tokens,
            validator: opts.validator,
            token_expiry_hours: opts.token_expiry_hours,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenService> {
        &self.tokens
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    pub async fn fetch_user_by_phone_number(&self, phone_number: &str) -> Result<Option<UserModel>, AppError> {
        self.users
            .get_user(UserFilter::by_phone_number(phone_number))
            .await
            .inspect_err(|e| error!("error fetching user: {e}"))
    }

    pub async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<UserModel>, AppError> {
        self.users
            .get_user(UserFilter::by_id(user_id))
            .await
            .inspect_err(|e| error!("error fetching user {user_id}: {e}"))
    }

    /// Signup: salt, hash, store. Returns the new user id.
    pub async fn register_new_user(&self, req: RUserRegister) -> Result<i64, AppError> {
        let salt = self.passwords.create_salt();
        let passwords = Arc::clone(&self.passwords);
        let hash_salt = salt.clone();
        let password_hash = web::block(move || passwords.generate_hash(&req.password, &hash_salt))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .inspect_err(|e| error!("error hashing password: {e}"))?;

        let user_id = self
            .users
            .create_user(DBUserCreate {
                phone_number: req.phone_number,
                full_name: req.full_name,
                password_hash,
                salt,
            })
            .await
            .inspect_err(|e| error!("error creating user: {e}"))?;

        info!("registered user {user_id}");
        Ok(user_id)
    }

    /// Checks the password and issues a session token.
    pub async fn perform_login(&self, req: RUserLogin) -> Result<(UserModel, String), AppError> {
        let user = self
            .fetch_user_by_phone_number(&req.phone_number)
            .await?
            .ok_or(AppError::NotFound)?;

        let passwords = Arc::clone(&self.passwords);
        let (stored_hash, salt) = (user.password_hash.clone(), user.salt.clone());
        let ok = web::block(move || passwords.verify_password(&req.password, &stored_hash, &salt))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if !ok {
            return Err(AppError::Unauthorized);
        }

        let token = self
            .tokens
            .create_token(TokenSubject { subject_id: user.id }, self.token_expiry_hours)
            .inspect_err(|e| error!("error creating token: {e}"))?;

        Ok((user, token))
    }

    /// Updates the profile; absent fields keep their stored value.
    pub async fn edit_user(&self, user_id: i64, req: RUserEdit) -> Result<(), AppError> {
        if let Some(phone_number) = &req.phone_number {
            if let Some(owner) = self.fetch_user_by_phone_number(phone_number).await? {
                if owner.id != user_id {
                    return Err(AppError::Conflict("phone number already exists".into()));
                }
            }
        }

        let current = self.fetch_user_by_id(user_id).await?.ok_or(AppError::NotFound)?;

        self.users
            .update_user(
                user_id,
                req.phone_number.unwrap_or(current.phone_number),
                req.full_name.unwrap_or(current.full_name),
            )
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists => AppError::Conflict("phone number already exists".into()),
                e => e,
            })
    }
}
