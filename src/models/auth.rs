use serde::{Deserialize, Serialize};

/// JWT claims carried by every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64, // user id
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
    pub aud: String,
    pub iss: String,
}

/// Body of POST /auth/signup and POST /auth/signin.
///
/// Fields are optional so that a missing field is reported as a validation
/// error instead of a deserialization failure.
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SigninResponse {
    pub access_token: String,
}
