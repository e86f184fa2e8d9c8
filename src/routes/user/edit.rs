use crate::routes::user::FORBIDDEN;
use crate::service::UserService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::RUserEdit;
use crate::utils::webutils::AuthenticatedUser;
use actix_web::{patch, web};

#[patch("/{id}/edit")]
pub async fn edit(
    service: web::Data<UserService>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<RUserEdit>,
) -> ApiResult<()> {
    let user_id = path.into_inner();
    if auth.subject_id() != user_id {
        return Err(AppError::Forbidden(FORBIDDEN));
    }

    let body = body.into_inner();
    service.validator().validate_edit(&body)?;

    match service.edit_user(user_id, body).await {
        Ok(()) => Ok(ApiResponse::NoContent),
        // token outlived its account
        Err(AppError::NotFound) => Err(AppError::Forbidden(FORBIDDEN)),
        Err(e) => Err(e),
    }
}
