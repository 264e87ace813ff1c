use actix_web::{web, HttpResponse};

use crate::models::{AuthRequest, PublicUser, SigninResponse};
use crate::services::AuthService;
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Auth",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "User created", body = PublicUser),
        (status = 400, description = "Missing or invalid email/password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    auth: web::Data<AuthService>,
    request: web::Json<AuthRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /auth/signup - email: {}", email);

    match auth.signup(&request).await {
        Ok(user) => Ok(HttpResponse::Created().json(user)),
        Err(e) => {
            log::warn!("❌ Signup failed: {} - {}", email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 400, description = "Missing or invalid email/password"),
        (status = 403, description = "Credentials incorrect")
    )
)]
pub async fn signin(
    auth: web::Data<AuthService>,
    request: web::Json<AuthRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /auth/signin - email: {}", email);

    match auth.signin(&request).await {
        Ok(response) => {
            log::info!("✅ Signin successful: {}", email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Signin failed: {} - {}", email, e);
            Err(e)
        }
    }
}
