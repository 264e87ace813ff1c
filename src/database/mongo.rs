use async_trait::async_trait;
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};

use super::{BookmarkStore, StoreError, UserStore};
use crate::models::{Bookmark, BookmarkPatch, NewBookmark, NewUser, User, UserPatch};

const USERS: &str = "users";
const BOOKMARKS: &str = "bookmarks";
const COUNTERS: &str = "counters";

const DUPLICATE_KEY: i32 = 11000;
const DEFAULT_DATABASE: &str = "bookmarks";

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
            ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
            _ => false,
        };
        if duplicate {
            StoreError::Duplicate("Credentials taken".to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        let db_name = database_name(&client_options);

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("✅ MongoDB connected: database {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique email per user, plus the owner lookup used by every bookmark listing.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection::<Document>(USERS).create_index(email_index).await?;
        log::info!("   ✅ Index ready: users(email) unique");

        let owner_index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .build();
        self.collection::<Document>(BOOKMARKS).create_index(owner_index).await?;
        log::info!("   ✅ Index ready: bookmarks(userId)");

        Ok(())
    }

    /// Next value of an integer sequence kept in the `counters` collection.
    async fn next_id(&self, sequence: &str) -> Result<i64, StoreError> {
        let counter = self
            .collection::<Document>(COUNTERS)
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::Backend(format!("Counter {} was not created", sequence)))?;

        counter
            .get_i64("seq")
            .map_err(|e| StoreError::Backend(format!("Counter {} is corrupt: {}", sequence, e)))
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// The database named in the URI path, or `bookmarks` when the URI has none.
fn database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}

fn now_bson() -> Result<mongodb::bson::Bson, StoreError> {
    Ok(mongodb::bson::to_bson(&Utc::now())?)
}

#[async_trait]
impl UserStore for MongoDB {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let created = User {
            id: self.next_id(USERS).await?,
            email: user.email,
            hash: user.hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        self.collection::<User>(USERS).insert_one(&created).await?;
        Ok(created)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "_id": id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.collection::<User>(USERS).find_one(doc! { "email": email }).await?)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut set = doc! { "updatedAt": now_bson()? };
        if let Some(email) = patch.email {
            set.insert("email", email);
        }
        if let Some(first_name) = patch.first_name {
            set.insert("firstName", first_name);
        }
        if let Some(last_name) = patch.last_name {
            set.insert("lastName", last_name);
        }

        Ok(self
            .collection::<User>(USERS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }
}

#[async_trait]
impl BookmarkStore for MongoDB {
    async fn list_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, StoreError> {
        let cursor = self
            .collection::<Bookmark>(BOOKMARKS)
            .find(doc! { "userId": user_id })
            .sort(doc! { "_id": 1 })
            .await?;

        Ok(cursor.try_collect::<Vec<Bookmark>>().await?)
    }

    async fn find_bookmark(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        Ok(self.collection::<Bookmark>(BOOKMARKS).find_one(doc! { "_id": id }).await?)
    }

    async fn create_bookmark(&self, bookmark: NewBookmark) -> Result<Bookmark, StoreError> {
        let now = Utc::now();
        let created = Bookmark {
            id: self.next_id(BOOKMARKS).await?,
            user_id: bookmark.user_id,
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            created_at: now,
            updated_at: now,
        };

        self.collection::<Bookmark>(BOOKMARKS).insert_one(&created).await?;
        Ok(created)
    }

    async fn update_bookmark(&self, id: i64, patch: BookmarkPatch) -> Result<Option<Bookmark>, StoreError> {
        let mut set = doc! { "updatedAt": now_bson()? };
        if let Some(title) = patch.title {
            set.insert("title", title);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }
        if let Some(link) = patch.link {
            set.insert("link", link);
        }

        Ok(self
            .collection::<Bookmark>(BOOKMARKS)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_bookmark(&self, id: i64) -> Result<bool, StoreError> {
        let result = self
            .collection::<Bookmark>(BOOKMARKS)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
