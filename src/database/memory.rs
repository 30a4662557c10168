use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Item, ItemPatch, NewItem, NewUser, User};
use crate::database::store::{ItemStore, UserStore};

/// In-process store used when no database is configured, and by tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list(&self, owner: Uuid) -> Result<Vec<Item>, DatabaseError> {
        let items = self.items.read().await;
        // Reverse insertion order first so equal timestamps stay newest-first
        let mut owned: Vec<Item> = items.iter().rev().filter(|i| i.owner == owner).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn insert(&self, owner: Uuid, new: NewItem) -> Result<Item, DatabaseError> {
        let item = Item::new(owner, new);
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn update(&self, owner: Uuid, id: Uuid, patch: ItemPatch) -> Result<Option<Item>, DatabaseError> {
        let mut items = self.items.write().await;
        Ok(items
            .iter_mut()
            .find(|i| i.id == id && i.owner == owner)
            .map(|item| {
                item.apply(&patch);
                item.clone()
            }))
    }

    async fn toggle(&self, owner: Uuid, id: Uuid) -> Result<Option<Item>, DatabaseError> {
        let mut items = self.items.write().await;
        Ok(items
            .iter_mut()
            .find(|i| i.id == id && i.owner == owner)
            .map(|item| {
                item.toggle();
                item.clone()
            }))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DatabaseError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| !(i.id == id && i.owner == owner));
        Ok(items.len() != before)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        let taken = users
            .iter()
            .any(|u| u.username == new.username || u.email.eq_ignore_ascii_case(&new.email));
        if taken {
            return Err(DatabaseError::Conflict("Username or email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == login || u.email.eq_ignore_ascii_case(login))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
