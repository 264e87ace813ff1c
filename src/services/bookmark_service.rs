use std::sync::Arc;

use crate::{
    database::BookmarkStore,
    models::{Bookmark, BookmarkPatch, CreateBookmarkRequest, EditBookmarkRequest, NewBookmark},
    utils::{
        validation::{optional_text, require_text},
        AppError,
    },
};

pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkStore>,
}

impl BookmarkService {
    pub fn new(bookmarks: Arc<dyn BookmarkStore>) -> Self {
        Self { bookmarks }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError> {
        Ok(self.bookmarks.list_bookmarks(user_id).await?)
    }

    /// Someone else's bookmark is reported exactly like a missing one.
    pub async fn get_by_id(&self, user_id: i64, bookmark_id: i64) -> Result<Bookmark, AppError> {
        match self.bookmarks.find_bookmark(bookmark_id).await? {
            Some(bookmark) if bookmark.is_owned_by(user_id) => Ok(bookmark),
            Some(_) => {
                log::warn!(
                    "⚠️ User {} tried to access bookmark {} owned by someone else",
                    user_id,
                    bookmark_id
                );
                Err(not_found(bookmark_id))
            }
            None => Err(not_found(bookmark_id)),
        }
    }

    pub async fn create(&self, user_id: i64, request: &CreateBookmarkRequest) -> Result<Bookmark, AppError> {
        let bookmark = NewBookmark {
            user_id,
            title: require_text("title", request.title.as_deref())?,
            link: require_text("link", request.link.as_deref())?,
            description: request.description.clone(),
        };

        Ok(self.bookmarks.create_bookmark(bookmark).await?)
    }

    pub async fn edit(
        &self,
        user_id: i64,
        bookmark_id: i64,
        request: &EditBookmarkRequest,
    ) -> Result<Bookmark, AppError> {
        let patch = BookmarkPatch {
            title: optional_text("title", request.title.as_deref())?,
            link: optional_text("link", request.link.as_deref())?,
            description: request.description.clone(),
        };

        self.get_by_id(user_id, bookmark_id).await?;

        self.bookmarks
            .update_bookmark(bookmark_id, patch)
            .await?
            .ok_or_else(|| not_found(bookmark_id))
    }

    pub async fn delete(&self, user_id: i64, bookmark_id: i64) -> Result<(), AppError> {
        self.get_by_id(user_id, bookmark_id).await?;

        if self.bookmarks.delete_bookmark(bookmark_id).await? {
            Ok(())
        } else {
            // removed concurrently between the check and the delete
            Err(not_found(bookmark_id))
        }
    }
}

fn not_found(bookmark_id: i64) -> AppError {
    AppError::not_found(format!("Bookmark {} not found", bookmark_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    const ALICE: i64 = 1;
    const BOB: i64 = 2;

    fn service() -> BookmarkService {
        BookmarkService::new(Arc::new(MemoryStore::new()))
    }

    fn create_request(title: &str) -> CreateBookmarkRequest {
        CreateBookmarkRequest {
            title: Some(title.to_string()),
            link: Some("https://www.youtube.com/watch?v=rFP7rUYtOOg".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn list_grows_and_shrinks_with_create_and_delete() {
        let bookmarks = service();
        assert!(bookmarks.list(ALICE).await.unwrap().is_empty());

        let created = bookmarks.create(ALICE, &create_request("Tech stack")).await.unwrap();
        assert_eq!(bookmarks.list(ALICE).await.unwrap().len(), 1);

        bookmarks.delete(ALICE, created.id).await.unwrap();
        assert!(bookmarks.list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_users_cannot_read_edit_or_delete() {
        let bookmarks = service();
        let created = bookmarks.create(ALICE, &create_request("mine")).await.unwrap();

        assert!(matches!(bookmarks.get_by_id(BOB, created.id).await, Err(AppError::NotFound(_))));
        let edit = EditBookmarkRequest { title: Some("hijacked".into()), ..Default::default() };
        assert!(matches!(bookmarks.edit(BOB, created.id, &edit).await, Err(AppError::NotFound(_))));
        assert!(matches!(bookmarks.delete(BOB, created.id).await, Err(AppError::NotFound(_))));

        assert!(bookmarks.list(BOB).await.unwrap().is_empty());
        assert_eq!(bookmarks.get_by_id(ALICE, created.id).await.unwrap().title, "mine");
    }

    #[tokio::test]
    async fn partial_edit_keeps_unspecified_fields() {
        let bookmarks = service();
        let created = bookmarks.create(ALICE, &create_request("old title")).await.unwrap();

        let edit = EditBookmarkRequest {
            title: Some("First bookmark".into()),
            description: Some("First bookmark ever".into()),
            link: None,
        };
        let edited = bookmarks.edit(ALICE, created.id, &edit).await.unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.title, "First bookmark");
        assert_eq!(edited.description.as_deref(), Some("First bookmark ever"));
        assert_eq!(edited.link, created.link);
        assert_eq!(edited.created_at, created.created_at);
    }

    #[tokio::test]
    async fn missing_title_or_link_is_rejected() {
        let bookmarks = service();
        let no_title = CreateBookmarkRequest { title: None, ..create_request("x") };
        let blank_link = CreateBookmarkRequest { link: Some(" ".into()), ..create_request("x") };

        assert!(matches!(bookmarks.create(ALICE, &no_title).await, Err(AppError::Validation(_))));
        assert!(matches!(bookmarks.create(ALICE, &blank_link).await, Err(AppError::Validation(_))));
        assert!(bookmarks.list(ALICE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let bookmarks = service();
        let created = bookmarks.create(ALICE, &create_request("t")).await.unwrap();

        bookmarks.delete(ALICE, created.id).await.unwrap();
        assert!(matches!(bookmarks.delete(ALICE, created.id).await, Err(AppError::NotFound(_))));
    }
}
