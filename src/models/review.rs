// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::item::ItemId;

pub type ReviewId = i64;

/// Visibility of a review on the public item page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Draft,
    Published,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Draft => "draft",
            ReviewStatus::Published => "published",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown review status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for ReviewStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ReviewStatus::Draft),
            "published" => Ok(ReviewStatus::Published),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Укажите имя автора отзыва")]
    MissingAuthor,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Option<ReviewId>,              // Assigned by the store on first save
    pub item_id: Option<ItemId>,           // ID of the item the review is associated with
    pub author: String,                    // Name of the reviewer, required
    pub review: String,                    // Body of the review, rendered escaped
    pub status: ReviewStatus,              // Only published reviews are shown
    pub created_at: Option<DateTime<Utc>>, // Set together with the id
}

impl Review {
    pub fn new(author: impl Into<String>, review: impl Into<String>) -> Self {
        Review {
            id: None,
            item_id: None,
            author: author.into(),
            review: review.into(),
            status: ReviewStatus::default(),
            created_at: None,
        }
    }

    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == ReviewStatus::Published
    }

    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.author.trim().is_empty() {
            return Err(ReviewError::MissingAuthor);
        }
        Ok(())
    }
}

impl Default for Review {
    fn default() -> Self {
        Review::new("", "")
    }
}
