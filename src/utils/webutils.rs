use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{http::header, web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use std::future::{ready, Ready};
use tracing::{error, warn};

use crate::service::UserService;
use crate::types::error::AppError;
use crate::types::token::SessionClaims;

pub const MISSING_AUTH_HEADER: &str = "missing Authorization Header";
pub const INVALID_AUTH_TOKEN: &str = "invalid Authorization Token";
pub const EXPIRED_AUTH_TOKEN: &str = "authorization Token is Not Valid";

/// Gate for protected scopes. The raw `Authorization` value is the token.
/// Accepted claims are left in the request extensions for `AuthenticatedUser`.
pub async fn validate_token(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let Some(service) = req.app_data::<web::Data<UserService>>().cloned() else {
        error!("validate_token mounted without a UserService in app data");
        return Ok(reject(req, AppError::Internal("token service missing".into())));
    };

    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(reject(req, AppError::Forbidden(MISSING_AUTH_HEADER)));
    };

    let token = match value.to_str() {
        Ok(token) => token.to_owned(),
        Err(e) => {
            warn!("Auth Error: non-ascii Authorization header: {e}");
            return Ok(reject(req, AppError::Forbidden(INVALID_AUTH_TOKEN)));
        }
    };

    match service.tokens().authorize(&token) {
        Ok(Some(claims)) => {
            req.extensions_mut().insert(claims);
            Ok(next.call(req).await?.map_into_boxed_body())
        }
        Ok(None) => Ok(reject(req, AppError::Forbidden(EXPIRED_AUTH_TOKEN))),
        Err(e) => {
            error!("Auth Error: {e}");
            Ok(reject(req, AppError::Forbidden(INVALID_AUTH_TOKEN)))
        }
    }
}

fn reject(req: ServiceRequest, err: AppError) -> ServiceResponse<BoxBody> {
    req.into_response(err.error_response())
}

/// Identity of the caller, as accepted by `validate_token`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub SessionClaims);

impl AuthenticatedUser {
    pub fn subject_id(&self) -> i64 {
        self.0.subject_id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionClaims>()
                .copied()
                .map(AuthenticatedUser)
                .ok_or(AppError::Forbidden(INVALID_AUTH_TOKEN)),
        )
    }
}
