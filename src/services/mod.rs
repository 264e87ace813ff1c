pub mod auth_service;
pub mod bookmark_service;
pub mod token_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use bookmark_service::BookmarkService;
pub use token_service::TokenService;
pub use user_service::UserService;

use std::sync::Arc;

use actix_web::web;

use crate::database::Stores;
use crate::utils::JwtConfig;

/// Assembles every service around the given store handles.
#[derive(Clone)]
pub struct Services {
    pub tokens: web::Data<TokenService>,
    pub auth: web::Data<AuthService>,
    pub users: web::Data<UserService>,
    pub bookmarks: web::Data<BookmarkService>,
}

impl Services {
    pub fn new(stores: &Stores, jwt: &JwtConfig) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));

        Self {
            auth: web::Data::new(AuthService::new(stores.users.clone(), tokens.clone())),
            users: web::Data::new(UserService::new(stores.users.clone())),
            bookmarks: web::Data::new(BookmarkService::new(stores.bookmarks.clone())),
            tokens: web::Data::from(tokens),
        }
    }
}
