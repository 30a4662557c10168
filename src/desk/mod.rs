//! Client-side desk state: the item list, pending delete confirmation and
//! optimistic toggles, over either the API or guest storage.

pub mod classify;
pub mod draft;
pub mod filter;
pub mod session;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

use crate::client::storage::StorageError;
use crate::client::ClientError;
use crate::database::models::{Item, ItemValidationError, UpdateItemRequest};

pub use classify::{classify, ContentKind};
pub use draft::ItemDraft;
pub use filter::ItemFilter;
pub use session::{Session, SessionUser};
pub use store::{DeskStore, LocalStore, RemoteStore};

#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ItemValidationError),

    #[error("Todo not found: {0}")]
    NotFound(Uuid),

    #[error("no item matches '{0}'")]
    UnknownId(String),

    #[error("'{0}' matches more than one item")]
    Ambiguous(String),

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("local storage lock poisoned")]
    StoragePoisoned,
}

pub struct Desk {
    store: Box<dyn DeskStore>,
    items: Vec<Item>,
    pending_delete: Option<Uuid>,
}

impl Desk {
    pub fn new(store: Box<dyn DeskStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
            pending_delete: None,
        }
    }

    /// Build a desk and load its items
    pub async fn open(store: Box<dyn DeskStore>) -> Result<Self, DeskError> {
        let mut desk = Self::new(store);
        desk.refresh().await?;
        Ok(desk)
    }

    pub async fn refresh(&mut self) -> Result<(), DeskError> {
        self.items = self.store.list().await?;
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn visible(&self, filter: &ItemFilter) -> Vec<&Item> {
        filter.apply(&self.items)
    }

    /// Validates locally before touching the store
    pub async fn add(&mut self, draft: &ItemDraft) -> Result<&Item, DeskError> {
        let request = draft.normalize()?;
        let item = self.store.create(request).await?;
        self.items.insert(0, item);
        Ok(&self.items[0])
    }

    pub async fn update(&mut self, id: Uuid, request: UpdateItemRequest) -> Result<&Item, DeskError> {
        let index = self.index_of(id)?;
        let item = self.store.update(id, request).await?;
        self.items[index] = item;
        Ok(&self.items[index])
    }

    /// Flip `done` locally, then reconcile with the store's answer. A
    /// failed call restores the previous value.
    pub async fn toggle_done(&mut self, id: Uuid) -> Result<&Item, DeskError> {
        let index = self.index_of(id)?;
        let previous = self.items[index].done;
        self.items[index].done = !previous;

        match self.store.toggle(id).await {
            Ok(item) => {
                self.items[index] = item;
                Ok(&self.items[index])
            }
            Err(e) => {
                tracing::warn!("Toggle of {} failed, reverting: {}", id, e);
                self.items[index].done = previous;
                Err(e)
            }
        }
    }

    /// First step of a delete. Replaces any earlier pending request.
    pub fn request_delete(&mut self, id: Uuid) -> Result<(), DeskError> {
        self.index_of(id)?;
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<Uuid, DeskError> {
        let id = self.pending_delete.take().ok_or(DeskError::NoPendingDelete)?;
        self.store.delete(id).await?;
        self.items.retain(|item| item.id != id);
        Ok(id)
    }

    /// Find an item by full id or unique id prefix
    pub fn resolve(&self, needle: &str) -> Result<Uuid, DeskError> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(DeskError::UnknownId(needle));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            return self.index_of(id).map(|_| id);
        }

        let mut matches = self
            .items
            .iter()
            .filter(|item| item.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item.id),
            (Some(_), Some(_)) => Err(DeskError::Ambiguous(needle)),
            _ => Err(DeskError::UnknownId(needle)),
        }
    }

    fn index_of(&self, id: Uuid) -> Result<usize, DeskError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(DeskError::NotFound(id))
    }
}
