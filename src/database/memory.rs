use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{BookmarkStore, StoreError, UserStore};
use crate::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    bookmarks: BTreeMap<i64, Bookmark>,
    next_user_id: i64,
    next_bookmark_id: i64,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// Process-local store with the same semantics as the MongoDB one.
/// Ids are sequential per entity, so `BTreeMap` order is creation order.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.email_taken(&user.email, None) {
            return Err(StoreError::Duplicate("Credentials taken".to_string()));
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: state.next_user_id,
            email: user.email,
            hash: user.hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        if let Some(email) = &patch.email {
            if state.email_taken(email, Some(id)) {
                return Err(StoreError::Duplicate("Credentials taken".to_string()));
            }
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = Some(last_name);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .bookmarks
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        Ok(self.state.read().await.bookmarks.get(&id).cloned())
    }

    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError> {
        let mut state = self.state.write().await;
        state.next_bookmark_id += 1;
        let now = Utc::now();
        let created = Bookmark {
            id: state.next_bookmark_id,
            user_id: bookmark.user_id,
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            created_at: now,
            updated_at: now,
        };
        state.bookmarks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_bookmark(&self, id: i64, patch: BookmarkPatch) -> Result<Option<Bookmark>, StoreError> {
        let mut state = self.state.write().await;
        let Some(bookmark) = state.bookmarks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            bookmark.title = title;
        }
        if let Some(description) = patch.description {
            bookmark.description = Some(description);
        }
        if let Some(link) = patch.link {
            bookmark.link = link;
        }
        bookmark.updated_at = Utc::now();
        Ok(Some(bookmark.clone()))
    }

    async fn delete_bookmark(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.state.write().await.bookmarks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser { email: email.to_string(), hash: "hash".to_string() }
    }

    fn new_bookmark(user_id: i64, title: &str) -> NewBookmark {
        NewBookmark {
            user_id,
            title: title.to_string(),
            description: None,
            link: "https://example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_and_original_kept() {
        let store = MemoryStore::new();
        let first = store.create_user(new_user("saitama@test.com")).await.unwrap();

        let err = store.create_user(new_user("saitama@test.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        let found = store.find_user_by_email("saitama@test.com").await.unwrap().unwrap();
        assert_eq!(found, first);
    }

    #[tokio::test]
    async fn user_email_cannot_be_changed_to_anothers() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@test.com")).await.unwrap();
        store.create_user(new_user("b@test.com")).await.unwrap();

        let patch = UserPatch { email: Some("b@test.com".into()), ..Default::default() };
        assert!(matches!(store.update_user(a.id, patch).await, Err(StoreError::Duplicate(_))));

        // re-setting your own email is not a conflict
        let patch = UserPatch { email: Some("a@test.com".into()), ..Default::default() };
        assert!(store.update_user(a.id, patch).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_user_update_is_none_even_with_taken_email() {
        let store = MemoryStore::new();
        store.create_user(new_user("taken@test.com")).await.unwrap();

        let patch = UserPatch { email: Some("taken@test.com".into()), ..Default::default() };
        assert!(store.update_user(999, patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bookmarks_listed_per_user_in_creation_order() {
        let store = MemoryStore::new();
        store.create_bookmark(new_bookmark(1, "first")).await.unwrap();
        store.create_bookmark(new_bookmark(2, "other")).await.unwrap();
        store.create_bookmark(new_bookmark(1, "second")).await.unwrap();

        let titles: Vec<_> = store
            .list_bookmarks(1)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        let b = store.create_bookmark(new_bookmark(1, "t")).await.unwrap();

        assert!(store.delete_bookmark(b.id).await.unwrap());
        assert!(!store.delete_bookmark(b.id).await.unwrap());
        assert!(store.find_bookmark(b.id).await.unwrap().is_none());
    }
}
