pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};
use crate::utils::StoreBackend;

pub use memory::MemoryStore;
pub use mongo::MongoDB;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint (user email) was violated.
    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Applies the patch and returns the updated record, `None` if the user is gone.
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks of a user in creation order.
    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, StoreError>;
    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, StoreError>;
    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError>;
    async fn update_bookmark(&self, id: i64, patch: BookmarkPatch) -> Result<Option<Bookmark>, StoreError>;
    /// Returns whether a record was removed.
    async fn delete_bookmark(&self, id: i64) -> Result<bool, StoreError>;
}

/// Store handles shared by the services for the lifetime of the process.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub bookmarks: Arc<dyn BookmarkStore>,
}

impl Stores {
    pub async fn connect(backend: &StoreBackend) -> Result<Self, StoreError> {
        match backend {
            StoreBackend::Mongo(uri) => {
                let db = Arc::new(MongoDB::new(uri).await?);
                Ok(Self { users: db.clone(), bookmarks: db })
            }
            StoreBackend::Memory => {
                log::warn!("⚠️  Using in-memory store, data is lost on shutdown");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self { users: store.clone(), bookmarks: store }
    }
}
