use chrono::{DateTime, Utc};
use thiserror::Error;

/// Claim key carrying the subject (user) id.
pub const SUBJECT_CLAIM_KEY: &str = "id";
/// Claim key carrying the absolute expiry, unix seconds.
pub const EXPIRY_CLAIM_KEY: &str = "exp";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("key error: {0}")]
    Key(String),
    #[error("signing error: {0}")]
    Signing(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// What a caller asks to be embedded in a new token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSubject {
    pub subject_id: i64,
}

/// Decoded token payload. Parsing alone says nothing about expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub subject_id: i64,
    pub expires_at: i64,
}

impl SessionClaims {
    /// True only when the expiry instant is strictly after `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expiry_is_exclusive() {
        let now = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let at_now = SessionClaims { subject_id: 1, expires_at: 1_700_000_000 };
        let after = SessionClaims { subject_id: 1, expires_at: 1_700_000_001 };

        assert!(!at_now.is_live_at(now));
        assert!(after.is_live_at(now));
    }
}
