use crate::database::models::{CreateItemRequest, ItemType, ItemValidationError};

/// What the user typed into the add form. Which field carries the body
/// depends on the chosen type.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub item_type: ItemType,
    pub task_name: String,
    pub task_description: String,
    /// Article text or YouTube URL
    pub content: String,
    pub image_url: String,
}

impl ItemDraft {
    pub fn task(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            item_type: ItemType::Task,
            task_name: name.into(),
            task_description: description.into(),
            ..Default::default()
        }
    }

    pub fn article(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            item_type: ItemType::Article,
            task_name: name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn youtube(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            item_type: ItemType::Youtube,
            task_name: name.into(),
            content: url.into(),
            ..Default::default()
        }
    }

    pub fn image(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            item_type: ItemType::Image,
            task_name: name.into(),
            image_url: url.into(),
            ..Default::default()
        }
    }

    /// The text that ends up in `taskDescription`
    fn body(&self) -> &str {
        match self.item_type {
            ItemType::Task => &self.task_description,
            ItemType::Article | ItemType::Youtube => &self.content,
            ItemType::Image => &self.image_url,
        }
    }

    /// Fold the type-specific fields into the `{taskName, taskDescription,
    /// type}` payload, rejecting drafts the server would refuse.
    pub fn normalize(&self) -> Result<CreateItemRequest, ItemValidationError> {
        let name = self.task_name.trim();
        let request = CreateItemRequest {
            task_name: (!name.is_empty()).then(|| name.to_string()),
            task_description: Some(self.body().trim().to_string()),
            item_type: Some(self.item_type.as_str().to_string()),
        };

        request.clone().validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_uses_description() {
        let request = ItemDraft::task("Buy milk", "2%").normalize().unwrap();
        assert_eq!(request.task_name.as_deref(), Some("Buy milk"));
        assert_eq!(request.task_description.as_deref(), Some("2%"));
        assert_eq!(request.item_type.as_deref(), Some("task"));
    }

    #[test]
    fn bookmarks_move_their_field_into_description() {
        let yt = ItemDraft::youtube("", " https://youtu.be/x ").normalize().unwrap();
        assert_eq!(yt.task_description.as_deref(), Some("https://youtu.be/x"));
        assert!(yt.task_name.is_none());

        let img = ItemDraft::image("Cat", "https://example.com/cat.png").normalize().unwrap();
        assert_eq!(img.task_description.as_deref(), Some("https://example.com/cat.png"));
        assert_eq!(img.item_type.as_deref(), Some("image"));
    }

    #[test]
    fn incomplete_drafts_are_rejected() {
        assert_eq!(
            ItemDraft::task("", "desc").normalize().unwrap_err(),
            ItemValidationError::MissingField("taskName")
        );
        // The description of an article draft is ignored; content is what counts
        let mut draft = ItemDraft::article("Read later", "");
        draft.task_description = "stray".into();
        assert_eq!(
            draft.normalize().unwrap_err(),
            ItemValidationError::MissingField("taskDescription")
        );
    }
}
