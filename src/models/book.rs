//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record, in catalog column order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i64>,
}

/// Create book request. The id is caller-supplied and immutable.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBook {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i64>,
}

/// Partial update request.
///
/// `Some(v)` means "set the column to v", `None` means "leave it untouched".
/// Presence is carried by the `Option`, never by truthiness, so a supplied
/// `rating` of 0 or an empty string is a real update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i64>,
}

impl BookUpdate {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.publication_year.is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.rating.is_none()
    }
}
