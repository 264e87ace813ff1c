use actix_web::{web, HttpResponse};

use crate::models::{BookmarkResponse, Claims, CreateBookmarkRequest, EditBookmarkRequest};
use crate::services::BookmarkService;
use crate::utils::AppError;

/// GET /bookmarks - all bookmarks of the caller, oldest first
#[utoipa::path(
    get,
    path = "/bookmarks",
    tag = "Bookmarks",
    responses(
        (status = 200, description = "Bookmarks of the caller", body = [BookmarkResponse]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookmarks(
    user: web::ReqData<Claims>,
    bookmarks: web::Data<BookmarkService>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /bookmarks - user {}", user.sub);

    let list: Vec<BookmarkResponse> = bookmarks
        .list(user.sub)
        .await?
        .into_iter()
        .map(BookmarkResponse::from)
        .collect();

    log::info!("✅ Listed {} bookmarks", list.len());
    Ok(HttpResponse::Ok().json(list))
}

#[utoipa::path(
    post,
    path = "/bookmarks",
    tag = "Bookmarks",
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 400, description = "Missing title or link"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_bookmark(
    user: web::ReqData<Claims>,
    bookmarks: web::Data<BookmarkService>,
    request: web::Json<CreateBookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /bookmarks - user {}", user.sub);

    let created = bookmarks.create(user.sub, &request).await?;
    log::info!("✅ Bookmark {} created", created.id);
    Ok(HttpResponse::Created().json(BookmarkResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    params(("id" = i64, Path, description = "Bookmark id")),
    responses(
        (status = 200, description = "The bookmark", body = BookmarkResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such bookmark for this user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_bookmark(
    user: web::ReqData<Claims>,
    bookmarks: web::Data<BookmarkService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let bookmark_id = path.into_inner();
    log::info!("🔎 GET /bookmarks/{} - user {}", bookmark_id, user.sub);

    let bookmark = bookmarks.get_by_id(user.sub, bookmark_id).await?;
    Ok(HttpResponse::Ok().json(BookmarkResponse::from(bookmark)))
}

#[utoipa::path(
    patch,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    params(("id" = i64, Path, description = "Bookmark id")),
    request_body = EditBookmarkRequest,
    responses(
        (status = 200, description = "Updated bookmark", body = BookmarkResponse),
        (status = 400, description = "Blank title or link"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such bookmark for this user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_bookmark(
    user: web::ReqData<Claims>,
    bookmarks: web::Data<BookmarkService>,
    path: web::Path<i64>,
    request: web::Json<EditBookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    let bookmark_id = path.into_inner();
    log::info!("🔧 PATCH /bookmarks/{} - user {}", bookmark_id, user.sub);

    match bookmarks.edit(user.sub, bookmark_id, &request).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(BookmarkResponse::from(updated))),
        Err(e) => {
            log::warn!("❌ Failed to update bookmark {}: {}", bookmark_id, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/bookmarks/{id}",
    tag = "Bookmarks",
    params(("id" = i64, Path, description = "Bookmark id")),
    responses(
        (status = 204, description = "Bookmark deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such bookmark for this user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_bookmark(
    user: web::ReqData<Claims>,
    bookmarks: web::Data<BookmarkService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let bookmark_id = path.into_inner();
    log::info!("🗑️ DELETE /bookmarks/{} - user {}", bookmark_id, user.sub);

    bookmarks.delete(user.sub, bookmark_id).await?;
    log::info!("✅ Bookmark {} deleted", bookmark_id);
    Ok(HttpResponse::NoContent().finish())
}
