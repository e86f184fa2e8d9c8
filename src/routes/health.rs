use actix_web::get;

use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::MessageRes;

#[get("")]
pub async fn health(
    _req: actix_web::HttpRequest
) -> ApiResult<MessageRes> {
    Ok(ApiResponse::Ok(MessageRes { message: "HI".to_string() }))
}
