//! Decides how an item's description should be presented.
//!
//! Priority order: YouTube link, image URL, any other web link, plain text.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Youtube,
    Image,
    Link,
    Text,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Youtube => "video",
            ContentKind::Image => "image",
            ContentKind::Link => "link",
            ContentKind::Text => "text",
        }
    }
}

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+$").expect("valid youtube regex")
    })
}

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\.(jpeg|jpg|gif|png|webp)(\?.*)?$").expect("valid image regex"))
}

pub fn is_youtube_url(text: &str) -> bool {
    youtube_pattern().is_match(text)
}

/// Case-insensitive, query strings allowed
pub fn is_image_url(text: &str) -> bool {
    image_pattern().is_match(&text.to_lowercase())
}

pub fn is_web_link(text: &str) -> bool {
    text.starts_with("http") || text.starts_with("www.")
}

pub fn classify(description: &str) -> ContentKind {
    let text = description.trim();
    if is_youtube_url(text) {
        ContentKind::Youtube
    } else if is_image_url(text) {
        ContentKind::Image
    } else if is_web_link(text) {
        ContentKind::Link
    } else {
        ContentKind::Text
    }
}

/// Prefix bare `www.` links with `https://` so they can be opened
pub fn ensure_url_protocol(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("www.") {
        format!("https://{}", url)
    } else {
        url.to_string()
    }
}

/// Openable target for linkable content, `None` for plain text
pub fn link_target(description: &str) -> Option<String> {
    match classify(description) {
        ContentKind::Text => None,
        _ => Some(ensure_url_protocol(description)),
    }
}
