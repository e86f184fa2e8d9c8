use std::env;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PASSWORD_SECRET: &str = "&&hD23";
pub const DEFAULT_HASH_COST: u32 = 16;
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 9;
pub const DEFAULT_PHONE_PREFIX: &str = "+62";
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:'\"<>,.?/~`";

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub keys: KeyConfig,
    pub password: PasswordConfig,
    pub validation: ValidationConfig,
    pub token_expiry_hours: i64,
}

/// PEM files holding the RS256 signing pair.
#[derive(Clone, Debug)]
pub struct KeyConfig {
    pub private_key_path: String,
    pub public_key_path: String,
}

/// Application-wide secret mixed into every password, plus the bcrypt cost.
#[derive(Clone)]
pub struct PasswordConfig {
    pub secret: String,
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        PasswordConfig {
            secret: DEFAULT_PASSWORD_SECRET.to_string(),
            cost: DEFAULT_HASH_COST,
        }
    }
}

// never print the secret
impl std::fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("secret", &"<redacted>")
            .field("cost", &self.cost)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ValidationConfig {
    pub phone_prefix: String,
    pub phone_min_len: usize,
    pub phone_max_len: usize,
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub password_min_len: usize,
    pub password_max_len: usize,
    pub password_symbols: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            phone_prefix: DEFAULT_PHONE_PREFIX.to_string(),
            phone_min_len: 10,
            phone_max_len: 13,
            name_min_len: 3,
            name_max_len: 60,
            password_min_len: 6,
            password_max_len: 64,
            password_symbols: PASSWORD_SYMBOLS.to_string(),
        }
    }
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or<T: FromStr>(key: &str, default: T) -> T {
        parse_or(env::var(key).ok(), default)
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("POSTGRES_URI");

        EnvConfig {
            port: Self::get_env_or("PORT", DEFAULT_PORT),
            db_url,
            keys: KeyConfig {
                private_key_path: Self::get_env_or("JWT_PRIVATE_KEY_PATH", "private_key.pem".to_string()),
                public_key_path: Self::get_env_or("JWT_PUBLIC_KEY_PATH", "public_key.pem".to_string()),
            },
            password: PasswordConfig {
                secret: Self::get_env_or("PASSWORD_SECRET", DEFAULT_PASSWORD_SECRET.to_string()),
                cost: Self::get_env_or("PASSWORD_HASH_COST", DEFAULT_HASH_COST),
            },
            validation: ValidationConfig {
                phone_prefix: Self::get_env_or("PHONE_PREFIX", DEFAULT_PHONE_PREFIX.to_string()),
                ..ValidationConfig::default()
            },
            token_expiry_hours: Self::get_env_or("TOKEN_EXPIRY_HOURS", DEFAULT_TOKEN_EXPIRY_HOURS),
        }
    }
}

/// Parses `value`, falling back to `default` when it is absent or unparsable.
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u16>(None, 8080), 8080);
        assert_eq!(parse_or::<u16>(Some("not-a-port".into()), 8080), 8080);
        assert_eq!(parse_or::<u16>(Some(" 9000 ".into()), 8080), 9000);
        assert_eq!(parse_or::<i64>(Some("-3".into()), 9), -3);
    }

    #[test]
    fn password_config_debug_hides_secret() {
        let rendered = format!("{:?}", PasswordConfig::default());
        assert!(!rendered.contains(DEFAULT_PASSWORD_SECRET));
        assert!(rendered.contains("16"));
    }
}
