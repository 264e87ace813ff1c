use std::sync::Arc;

use crate::{
    database::UserStore,
    models::{AuthRequest, NewUser, PublicUser, SigninResponse},
    services::token_service::TokenService,
    utils::{
        password::{hash_password, verify_password},
        validation::{validate_email, validate_password},
        AppError, AuthFailure,
    },
};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user. Only the argon2 hash of the password is stored.
    pub async fn signup(&self, request: &AuthRequest) -> Result<PublicUser, AppError> {
        let email = validate_email(request.email.as_deref())?;
        let password = validate_password(request.password.as_deref())?;

        let hash = hash_password(password).await?;
        let user = self.users.create_user(NewUser { email, hash }).await?;

        log::info!("✅ User registered: id {}", user.id);
        Ok(PublicUser::from(user))
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn signin(&self, request: &AuthRequest) -> Result<SigninResponse, AppError> {
        let email = validate_email(request.email.as_deref())?;
        let password = validate_password(request.password.as_deref())?;

        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::Authentication(AuthFailure::BadCredentials))?;

        if !verify_password(password, user.hash.clone()).await? {
            return Err(AppError::Authentication(AuthFailure::BadCredentials));
        }

        Ok(SigninResponse {
            access_token: self.tokens.issue(&user)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::utils::JwtConfig;

    fn service() -> (AuthService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "bookmark-service".into(),
            audience: "bookmark-api".into(),
            ttl: chrono::Duration::minutes(15),
        }));
        (AuthService::new(Arc::new(MemoryStore::new()), tokens.clone()), tokens)
    }

    fn creds(email: &str, password: &str) -> AuthRequest {
        AuthRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn signup_then_signin_yields_token_for_that_user() {
        let (auth, tokens) = service();
        let user = auth.signup(&creds("saitama@test.com", "123")).await.unwrap();

        let token = auth.signin(&creds("saitama@test.com", "123")).await.unwrap().access_token;
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "saitama@test.com");
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let (auth, _) = service();
        auth.signup(&creds("saitama@test.com", "123")).await.unwrap();

        let err = auth.signup(&creds("saitama@test.com", "456")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // the original password still works
        assert!(auth.signin(&creds("saitama@test.com", "123")).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_fail_the_same_way() {
        let (auth, _) = service();
        auth.signup(&creds("saitama@test.com", "123")).await.unwrap();

        for attempt in [creds("saitama@test.com", "wrong"), creds("genos@test.com", "123")] {
            let err = auth.signin(&attempt).await.unwrap_err();
            assert!(matches!(err, AppError::Authentication(AuthFailure::BadCredentials)));
        }
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        let (auth, _) = service();

        let missing_email = AuthRequest { email: None, password: Some("123".into()) };
        let missing_password = AuthRequest { email: Some("saitama@test.com".into()), password: None };

        for req in [missing_email, missing_password, AuthRequest::default()] {
            assert!(matches!(auth.signup(&req).await, Err(AppError::Validation(_))));
            assert!(matches!(auth.signin(&req).await, Err(AppError::Validation(_))));
        }

        // nothing was created along the way
        assert!(auth.users.find_user_by_email("saitama@test.com").await.unwrap().is_none());
    }
}
