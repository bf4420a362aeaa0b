use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ItemId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Option<ItemId>,                // Assigned by the store on first save
    pub title: String,                     // Item title, shown as the page heading
    pub created_at: Option<DateTime<Utc>>, // Set together with the id
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Item {
            id: None,
            title: title.into(),
            created_at: None,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Public page of the item, or `None` while it has not been saved.
    pub fn path(&self) -> Option<String> {
        self.id.map(item_path)
    }
}

pub fn item_path(id: ItemId) -> String {
    format!("/item/{}", id)
}

pub fn review_action_path(id: ItemId) -> String {
    format!("/item/{}/review", id)
}

/// Parses an item id taken from a URL segment. Anything that is not the
/// canonical form of a positive integer (`123e`, `-1`, `007`, empty) is rejected.
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    if raw.is_empty() || raw.starts_with('0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<ItemId>().ok()
}
