use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The four kinds of things a desk can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Task,
    Article,
    Youtube,
    Image,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Task => "task",
            ItemType::Article => "article",
            ItemType::Youtube => "youtube",
            ItemType::Image => "image",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "task" => Ok(ItemType::Task),
            "article" => Ok(ItemType::Article),
            "youtube" => Ok(ItemType::Youtube),
            "image" => Ok(ItemType::Image),
            other => Err(ItemValidationError::UnknownType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ItemType {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A persisted desk item as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    #[serde(rename = "type", default)]
    #[sqlx(rename = "item_type", try_from = "String")]
    pub item_type: ItemType,
    pub task_name: Option<String>,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub done: bool,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a fresh, not-yet-done item. Used by stores that generate ids
    /// themselves (memory store, guest storage).
    pub fn new(owner: Uuid, new: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            item_type: new.item_type,
            task_name: new.task_name,
            task_description: new.task_description,
            done: false,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place. Absent fields are left untouched.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.task_name {
            self.task_name = Some(name.clone());
        }
        if let Some(description) = &patch.task_description {
            self.task_description = description.clone();
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        self.updated_at = Utc::now();
    }

    pub fn toggle(&mut self) {
        self.done = !self.done;
        self.updated_at = Utc::now();
    }

    /// Display name, falling back to the type label for untitled bookmarks.
    pub fn title(&self) -> &str {
        match self.task_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.item_type.as_str(),
        }
    }
}

/// Validated input for creating an item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub item_type: ItemType,
    pub task_name: Option<String>,
    pub task_description: String,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Unknown item type '{0}'")]
    UnknownType(String),
}

impl ItemValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ItemValidationError::MissingField(field) => field,
            ItemValidationError::UnknownType(_) => "type",
        }
    }
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

impl CreateItemRequest {
    /// Trim fields and enforce the required ones: a description always, a
    /// name when the item is a task.
    pub fn validate(self) -> Result<NewItem, ItemValidationError> {
        let item_type = match self.item_type.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => ItemType::default(),
        };

        let task_name = non_blank(self.task_name);
        if item_type == ItemType::Task && task_name.is_none() {
            return Err(ItemValidationError::MissingField("taskName"));
        }

        let task_description =
            non_blank(self.task_description).ok_or(ItemValidationError::MissingField("taskDescription"))?;

        Ok(NewItem {
            item_type,
            task_name,
            task_description,
        })
    }
}

/// Body of `PUT /todos/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl UpdateItemRequest {
    pub fn validate(self) -> Result<ItemPatch, ItemValidationError> {
        let task_name = match self.task_name {
            Some(raw) => Some(non_blank(Some(raw)).ok_or(ItemValidationError::MissingField("taskName"))?),
            None => None,
        };
        let task_description = match self.task_description {
            Some(raw) => Some(
                non_blank(Some(raw)).ok_or(ItemValidationError::MissingField("taskDescription"))?,
            ),
            None => None,
        };

        Ok(ItemPatch {
            task_name,
            task_description,
            done: self.done,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
