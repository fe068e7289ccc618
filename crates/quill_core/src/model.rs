//! Journal entry and settings document models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::RawTimestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Story,
    Image,
    Video,
}

/// An entry document as stored by the backend. Date fields keep whatever
/// shape the store persisted them in; `normalize_entry` turns a record
/// into an [`Entry`] with one canonical timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<RawTimestamp>,
    #[serde(default)]
    pub created_at: Option<RawTimestamp>,
    #[serde(default)]
    pub updated_at: Option<RawTimestamp>,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(rename = "youtubeEmbedUrl", default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub title_size: Option<f64>,
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub owner_id: String,
}

/// A normalized entry. `date` is the canonical display timestamp
/// (`date` falling back to `created_at`); downstream code never
/// re-derives it.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub mood: Option<String>,
    pub location: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub kind: EntryKind,
    pub media: Option<String>,
    pub embed_url: Option<String>,
    pub image_urls: Vec<String>,
    pub title_size: Option<f64>,
    pub line_height: Option<f64>,
    pub is_published: bool,
    pub owner_id: String,
}

impl Entry {
    /// The image shown above the entry body, when one exists.
    pub fn cover_image(&self) -> Option<&str> {
        self.media
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| self.image_urls.first().map(String::as_str))
    }
}

/// The single quote settings document shown on the journal home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub use_image_cover: bool,
    #[serde(default = "default_quote_font_size")]
    pub font_size: u32,
}

fn default_quote_font_size() -> u32 {
    18
}
