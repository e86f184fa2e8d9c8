use bcrypt::BcryptError;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PasswordConfig;

/// bcrypt reads at most 72 bytes; the combined input is cut to 71.
pub const MAX_PASSWORD_INPUT_LEN: usize = 71;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] BcryptError),
}

pub trait PasswordManager: Send + Sync {
    /// Fresh per-user salt: 128 random bits as 32 hex chars.
    fn create_salt(&self) -> String;
    fn generate_hash(&self, raw_password: &str, salt: &str) -> Result<String, PasswordError>;
    /// `false` on mismatch or an unreadable stored hash.
    fn verify_password(&self, raw_password: &str, stored_hash: &str, salt: &str) -> bool;
}

/// Mixes the application secret and the per-user salt into the password
/// before bcrypt sees it.
pub struct BcryptPasswordManager {
    config: PasswordConfig,
}

impl BcryptPasswordManager {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    // secret + password + salt, same order and cut on both paths
    fn enhance(&self, raw_password: &str, salt: &str) -> Vec<u8> {
        let mut combined = format!("{}{}{}", self.config.secret, raw_password, salt).into_bytes();
        combined.truncate(MAX_PASSWORD_INPUT_LEN);
        combined
    }
}

impl PasswordManager for BcryptPasswordManager {
    fn create_salt(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn generate_hash(&self, raw_password: &str, salt: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(self.enhance(raw_password, salt), self.config.cost)?)
    }

    fn verify_password(&self, raw_password: &str, stored_hash: &str, salt: &str) -> bool {
        let salt = salt.trim();
        bcrypt::verify(self.enhance(raw_password, salt), stored_hash).unwrap_or(false)
    }
}
