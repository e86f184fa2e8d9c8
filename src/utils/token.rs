use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use std::fs;

use crate::types::token::{
    SessionClaims, TokenError, TokenSubject, EXPIRY_CLAIM_KEY, SUBJECT_CLAIM_KEY,
};

pub trait TokenService: Send + Sync {
    fn create_token(&self, subject: TokenSubject, expire_in_hours: i64) -> Result<String, TokenError>;

    /// Checks the signature and decodes the claims. Expired tokens still parse.
    fn parse_token(&self, token: &str) -> Result<SessionClaims, TokenError>;

    /// Parsed claims when the token is also unexpired, `None` when it has expired.
    fn authorize(&self, token: &str) -> Result<Option<SessionClaims>, TokenError> {
        let claims = self.parse_token(token)?;
        Ok(claims.is_live_at(Utc::now()).then_some(claims))
    }

    fn is_valid(&self, token: &str) -> Result<bool, TokenError> {
        Ok(self.authorize(token)?.is_some())
    }
}

/// RS256 issuer/verifier. Keys are parsed once and never change.
pub struct JwtTokenService {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| TokenError::Key(format!("failed to parse private key: {e}")))?;
        let mut service = Self::verifier(public_pem)?;
        service.encoding_key = Some(encoding_key);
        Ok(service)
    }

    /// Verify-only service; `create_token` fails with `TokenError::Key`.
    pub fn verifier(public_pem: &[u8]) -> Result<Self, TokenError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| TokenError::Key(format!("failed to parse public key: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        // expiry is enforced by `authorize`, not by the decoder
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self { encoding_key: None, decoding_key, validation })
    }

    pub fn from_files(private_key_path: &str, public_key_path: &str) -> Result<Self, TokenError> {
        let read = |path: &str| {
            fs::read(path).map_err(|e| TokenError::Key(format!("failed to read {path}: {e}")))
        };
        Self::from_pem(&read(private_key_path)?, &read(public_key_path)?)
    }
}

impl TokenService for JwtTokenService {
    fn create_token(&self, subject: TokenSubject, expire_in_hours: i64) -> Result<String, TokenError> {
        let key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| TokenError::Key("private key not loaded".into()))?;

        let expires_at = TimeDelta::try_hours(expire_in_hours)
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .ok_or_else(|| TokenError::Signing(format!("expiry of {expire_in_hours}h is out of range")))?;

        let mut claims = Map::new();
        claims.insert(SUBJECT_CLAIM_KEY.into(), Value::from(subject.subject_id));
        claims.insert(EXPIRY_CLAIM_KEY.into(), Value::from(expires_at.timestamp()));

        encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| TokenError::Signing(format!("failed to sign token: {e}")))
    }

    fn parse_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Parse(format!("failed to parse token: {e}")))?;

        Ok(SessionClaims {
            subject_id: claim_as_i64(&data.claims, SUBJECT_CLAIM_KEY)?,
            expires_at: claim_as_i64(&data.claims, EXPIRY_CLAIM_KEY)?,
        })
    }
}

/// Numeric claims may arrive as integers, floats or numeric strings.
fn claim_as_i64(claims: &Map<String, Value>, key: &str) -> Result<i64, TokenError> {
    match claims.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| TokenError::Parse(format!("claim `{key}` is not an integer: {n}"))),
        Some(Value::String(s)) => s
            .parse::<i64>()
            .map_err(|e| TokenError::Parse(format!("claim `{key}` is not numeric: {e}"))),
        Some(other) => Err(TokenError::Parse(format!("claim `{key}` has unsupported type: {other}"))),
        None => Err(TokenError::Parse(format!("claim `{key}` is missing"))),
    }
}
