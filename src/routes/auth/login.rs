use crate::service::UserService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RUserLogin, UserLoginRes};
use actix_web::{post, web};

#[post("")]
pub async fn login(
    service: web::Data<UserService>,
    body: web::Json<RUserLogin>,
) -> ApiResult<UserLoginRes> {
    let body = body.into_inner();
    service.validator().validate_login(&body)?;

    let (user, jwt) = service.perform_login(body).await?;

    Ok(ApiResponse::Ok(UserLoginRes { jwt, user_id: user.id }))
}
