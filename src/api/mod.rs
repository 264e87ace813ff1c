pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod swagger;
pub mod users;

use actix_web::web;

use crate::middleware::AuthMiddleware;
use crate::services::Services;
use crate::utils::AppError;

/// Body extraction failures (no body, wrong content type, bad JSON) are validation errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("❌ {} {} - invalid body: {}", req.method(), req.path(), err);
        AppError::validation(format!("Invalid request body: {}", err)).into()
    })
}

/// Registers services and every route of the API.
pub fn configure(services: Services) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config())
            .app_data(services.tokens)
            .app_data(services.auth)
            .app_data(services.users)
            .app_data(services.bookmarks)
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(auth::signup))
                    .route("/signin", web::post().to(auth::signin)),
            )
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware)
                    .route("/me", web::get().to(users::get_me))
                    .route("", web::patch().to(users::edit_user)),
            )
            .service(
                web::scope("/bookmarks")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(bookmarks::list_bookmarks))
                    .route("", web::post().to(bookmarks::create_bookmark))
                    .route("/{id}", web::get().to(bookmarks::get_bookmark))
                    .route("/{id}", web::patch().to(bookmarks::edit_bookmark))
                    .route("/{id}", web::delete().to(bookmarks::delete_bookmark)),
            );
    }
}
