use actix_web::{web, HttpResponse};

use crate::models::{Claims, EditUserRequest, PublicUser};
use crate::services::UserService;
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = PublicUser),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    user: web::ReqData<Claims>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/me - user {}", user.sub);

    let me = users.get_self(user.sub).await?;
    Ok(HttpResponse::Ok().json(me))
}

#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "Updated user", body = PublicUser),
        (status = 400, description = "Invalid patch"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_user(
    user: web::ReqData<Claims>,
    users: web::Data<UserService>,
    request: web::Json<EditUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔧 PATCH /users - user {}", user.sub);

    match users.edit_self(user.sub, &request).await {
        Ok(updated) => {
            log::info!("✅ User {} updated", user.sub);
            Ok(HttpResponse::Ok().json(updated))
        }
        Err(e) => {
            log::warn!("❌ Failed to update user {}: {}", user.sub, e);
            Err(e)
        }
    }
}
