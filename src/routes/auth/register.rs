use crate::service::UserService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserRegister, UserRegisterRes};
use actix_web::{post, web};

#[post("")]
pub async fn register(
    service: web::Data<UserService>,
    body: web::Json<RUserRegister>,
) -> ApiResult<UserRegisterRes> {
    let body = body.into_inner();
    service.validator().validate_register(&body)?;

    if service.fetch_user_by_phone_number(&body.phone_number).await?.is_some() {
        return Err(AppError::AlreadyExists);
    }

    let id = service.register_new_user(body).await?;

    Ok(ApiResponse::Created(UserRegisterRes { id }))
}
