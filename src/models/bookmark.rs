use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bookmark as persisted (MongoDB `bookmarks` collection).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: i64,

    /// Owner of the bookmark
    pub user_id: i64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub link: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// POST /bookmarks body
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct CreateBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// PATCH /bookmarks/{id} body
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct EditBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Bookmark as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        BookmarkResponse {
            id: bookmark.id,
            user_id: bookmark.user_id,
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}
