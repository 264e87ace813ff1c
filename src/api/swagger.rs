use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookmark Service API",
        version = "1.0.0",
        description = "Multi-user bookmark manager.\n\n**Authentication:** sign up, sign in, then send the returned `access_token` as a JWT Bearer token to every `/users` and `/bookmarks` endpoint."
    ),
    paths(
        // Auth
        crate::api::auth::signup,
        crate::api::auth::signin,

        // Users
        crate::api::users::get_me,
        crate::api::users::edit_user,

        // Bookmarks
        crate::api::bookmarks::list_bookmarks,
        crate::api::bookmarks::create_bookmark,
        crate::api::bookmarks::get_bookmark,
        crate::api::bookmarks::edit_bookmark,
        crate::api::bookmarks::delete_bookmark,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::AuthRequest,
            crate::models::SigninResponse,
            crate::models::PublicUser,
            crate::models::EditUserRequest,
            crate::models::CreateBookmarkRequest,
            crate::models::EditBookmarkRequest,
            crate::models::BookmarkResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Email/password signup and signin."),
        (name = "Users", description = "The authenticated user's own profile."),
        (name = "Bookmarks", description = "CRUD on the authenticated user's bookmarks."),
        (name = "Health", description = "Liveness check."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build()
                ),
            );
        }
    }
}
