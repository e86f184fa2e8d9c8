use crate::routes::user::FORBIDDEN;
use crate::service::UserService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserProfileRes;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{get, web};
use tracing::warn;

#[get("/{id}")]
pub async fn profile(
    service: web::Data<UserService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<UserProfileRes> {
    let user_id = path.into_inner();
    if auth.subject_id() != user_id {
        return Err(AppError::Forbidden(FORBIDDEN));
    }

    match service.fetch_user_by_id(user_id).await? {
        Some(user) => Ok(ApiResponse::Ok(user.into())),
        None => {
            warn!("profile requested for missing user {user_id}");
            Err(AppError::Forbidden(FORBIDDEN))
        }
    }
}
