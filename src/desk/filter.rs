use crate::database::models::{Item, ItemType};

/// Search text plus optional type restriction, applied client-side
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub search: String,
    pub item_type: Option<ItemType>,
}

impl ItemFilter {
    pub fn new(search: impl Into<String>, item_type: Option<ItemType>) -> Self {
        Self {
            search: search.into(),
            item_type,
        }
    }

    /// Case-insensitive substring match on name and description
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(kind) = self.item_type {
            if item.item_type != kind {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let name = item.task_name.as_deref().unwrap_or_default().to_lowercase();
        name.contains(&needle) || item.task_description.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}
