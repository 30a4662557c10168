use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::DeskError;
use crate::client::storage::{LocalStorage, GUEST_TODOS_KEY};
use crate::client::ApiClient;
use crate::database::models::{CreateItemRequest, Item, UpdateItemRequest};

/// Where the desk's items live: the API for signed-in users, local
/// storage for guests.
#[async_trait]
pub trait DeskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, DeskError>;

    async fn create(&self, request: CreateItemRequest) -> Result<Item, DeskError>;

    async fn update(&self, id: Uuid, request: UpdateItemRequest) -> Result<Item, DeskError>;

    async fn toggle(&self, id: Uuid) -> Result<Item, DeskError>;

    async fn delete(&self, id: Uuid) -> Result<(), DeskError>;
}

pub struct RemoteStore {
    client: ApiClient,
}

impl RemoteStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeskStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Item>, DeskError> {
        Ok(self.client.list_items().await?)
    }

    async fn create(&self, request: CreateItemRequest) -> Result<Item, DeskError> {
        Ok(self.client.create_item(&request).await?)
    }

    async fn update(&self, id: Uuid, request: UpdateItemRequest) -> Result<Item, DeskError> {
        Ok(self.client.update_item(id, &request).await?)
    }

    async fn toggle(&self, id: Uuid) -> Result<Item, DeskError> {
        Ok(self.client.toggle_item(id).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DeskError> {
        self.client.delete_item(id).await?;
        Ok(())
    }
}

/// Guest items, kept as a JSON array under `guestTodos`, newest first
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<Mutex<LocalStorage>>,
}

impl LocalStore {
    pub fn new(storage: Arc<Mutex<LocalStorage>>) -> Self {
        Self { storage }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LocalStorage>, DeskError> {
        self.storage.lock().map_err(|_| DeskError::StoragePoisoned)
    }

    fn load(storage: &LocalStorage) -> Result<Vec<Item>, DeskError> {
        Ok(storage.get_json::<Vec<Item>>(GUEST_TODOS_KEY)?.unwrap_or_default())
    }

    fn save(storage: &mut LocalStorage, items: &[Item]) -> Result<(), DeskError> {
        storage.set_json(GUEST_TODOS_KEY, &items)?;
        Ok(())
    }

    /// Load, mutate one item, save
    fn modify(&self, id: Uuid, f: impl FnOnce(&mut Item)) -> Result<Item, DeskError> {
        let mut storage = self.lock()?;
        let mut items = Self::load(&storage)?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(DeskError::NotFound(id))?;
        f(item);
        let updated = item.clone();
        Self::save(&mut storage, &items)?;
        Ok(updated)
    }
}

#[async_trait]
impl DeskStore for LocalStore {
    async fn list(&self) -> Result<Vec<Item>, DeskError> {
        let storage = self.lock()?;
        Self::load(&storage)
    }

    async fn create(&self, request: CreateItemRequest) -> Result<Item, DeskError> {
        let item = Item::new(Uuid::nil(), request.validate()?);

        let mut storage = self.lock()?;
        let mut items = Self::load(&storage)?;
        items.insert(0, item.clone());
        Self::save(&mut storage, &items)?;
        Ok(item)
    }

    async fn update(&self, id: Uuid, request: UpdateItemRequest) -> Result<Item, DeskError> {
        let patch = request.validate()?;
        self.modify(id, |item| item.apply(&patch))
    }

    async fn toggle(&self, id: Uuid) -> Result<Item, DeskError> {
        self.modify(id, Item::toggle)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DeskError> {
        let mut storage = self.lock()?;
        let mut items = Self::load(&storage)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(DeskError::NotFound(id));
        }
        Self::save(&mut storage, &items)
    }
}
