use std::sync::Arc;

use crate::{
    database::UserStore,
    models::{EditUserRequest, PublicUser, UserPatch},
    utils::{
        validation::{optional_text, validate_email},
        AppError, AuthFailure,
    },
};

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// A valid token whose user has since disappeared is treated as unauthenticated.
    pub async fn get_self(&self, user_id: i64) -> Result<PublicUser, AppError> {
        self.users
            .find_user_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or(AppError::Authentication(AuthFailure::UnknownUser))
    }

    /// `user_id` always comes from the verified token, never from the body.
    pub async fn edit_self(&self, user_id: i64, request: &EditUserRequest) -> Result<PublicUser, AppError> {
        let patch = UserPatch {
            email: request
                .email
                .as_deref()
                .map(|email| validate_email(Some(email)))
                .transpose()?,
            first_name: optional_text("firstName", request.first_name.as_deref())?,
            last_name: optional_text("lastName", request.last_name.as_deref())?,
        };

        self.users
            .update_user(user_id, patch)
            .await?
            .map(PublicUser::from)
            .ok_or(AppError::Authentication(AuthFailure::UnknownUser))
    }
}
