use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Item, ItemPatch, NewItem, NewUser, User};

/// Owner-scoped access to desk items.
///
/// Every lookup takes the caller's user id alongside the item id; an item
/// owned by someone else is reported exactly like a missing one (`None` /
/// `false`).
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items of `owner`, newest first
    async fn list(&self, owner: Uuid) -> Result<Vec<Item>, DatabaseError>;

    async fn insert(&self, owner: Uuid, new: NewItem) -> Result<Item, DatabaseError>;

    async fn update(&self, owner: Uuid, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, DatabaseError>;

    async fn toggle(&self, owner: Uuid, id: Uuid) -> Result<Option<Item>, DatabaseError>;

    /// Returns whether an item was removed
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DatabaseError>;

    /// Connectivity probe used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Short backend name for diagnostics
    fn backend(&self) -> &'static str;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `DatabaseError::Conflict` when the username or email is taken
    async fn create(&self, new: NewUser) -> Result<User, DatabaseError>;

    /// Look a user up by username or email
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}
