use async_trait::async_trait;
use chrono::Utc;
use entity::user::Model as UserModel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use user_service::db::user::UserRepository;
use user_service::types::error::AppError;
use user_service::types::token::{SessionClaims, TokenError, TokenSubject};
use user_service::types::user::{DBUserCreate, UserFilter};
use user_service::utils::password::{PasswordError, PasswordManager};
use user_service::utils::token::TokenService;

/// Users kept in a Vec; ids start at 1.
#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<UserModel>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create_user(&self, payload: DBUserCreate) -> Result<i64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.phone_number == payload.phone_number) {
            return Err(AppError::AlreadyExists);
        }
        let now = Utc::now();
        let id = rows.len() as i64 + 1;
        rows.push(UserModel {
            id,
            phone_number: payload.phone_number,
            full_name: payload.full_name,
            password_hash: payload.password_hash,
            salt: payload.salt,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn get_user(&self, filter: UserFilter) -> Result<Option<UserModel>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|u| {
                filter.id.map_or(true, |id| u.id == id)
                    && filter.phone_number.as_ref().map_or(true, |p| &u.phone_number == p)
            })
            .cloned())
    }

    async fn update_user(&self, id: i64, phone_number: String, full_name: String) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.id != id && u.phone_number == phone_number) {
            return Err(AppError::AlreadyExists);
        }
        let user = rows.iter_mut().find(|u| u.id == id).ok_or(AppError::NotFound)?;
        user.phone_number = phone_number;
        user.full_name = full_name;
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// Reversible "hash" so flow tests skip bcrypt.
#[derive(Default)]
pub struct PlainPasswords {
    counter: AtomicU64,
}

impl PasswordManager for PlainPasswords {
    fn create_salt(&self) -> String {
        format!("salt{}", self.counter.fetch_add(1, Ordering::SeqCst))
    }

    fn generate_hash(&self, raw_password: &str, salt: &str) -> Result<String, PasswordError> {
        Ok(format!("plain${raw_password}${salt}"))
    }

    fn verify_password(&self, raw_password: &str, stored_hash: &str, salt: &str) -> bool {
        stored_hash == format!("plain${raw_password}${}", salt.trim())
    }
}

/// `PlainPasswords` with a hash slow enough to overlap concurrent requests.
pub struct SlowPasswords {
    pub inner: PlainPasswords,
    pub delay: Duration,
}

impl PasswordManager for SlowPasswords {
    fn create_salt(&self) -> String {
        self.inner.create_salt()
    }

    fn generate_hash(&self, raw_password: &str, salt: &str) -> Result<String, PasswordError> {
        std::thread::sleep(self.delay);
        self.inner.generate_hash(raw_password, salt)
    }

    fn verify_password(&self, raw_password: &str, stored_hash: &str, salt: &str) -> bool {
        self.inner.verify_password(raw_password, stored_hash, salt)
    }
}

pub enum FixedOutcome {
    Claims(SessionClaims),
    ParseFailure,
}

/// Token service that answers every parse with the same outcome.
pub struct FixedTokens(pub FixedOutcome);

impl TokenService for FixedTokens {
    fn create_token(&self, subject: TokenSubject, _expire_in_hours: i64) -> Result<String, TokenError> {
        Ok(format!("fixed-{}", subject.subject_id))
    }

    fn parse_token(&self, _token: &str) -> Result<SessionClaims, TokenError> {
        match &self.0 {
            FixedOutcome::Claims(claims) => Ok(*claims),
            FixedOutcome::ParseFailure => Err(TokenError::Parse("fixed failure".into())),
        }
    }
}
