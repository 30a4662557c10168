pub mod item;
pub mod user;

pub use item::{CreateItemRequest, Item, ItemPatch, ItemType, ItemValidationError, NewItem, UpdateItemRequest};
pub use user::{NewUser, PublicUser, User};
