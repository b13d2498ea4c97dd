use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, Result};

/// A course row
///
/// `id` is assigned by the persistence layer when the row is created and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    /// Catalog code (e.g. "CSE-220"); unique by convention only
    pub code: String,
    pub credits: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Build a course stamped with the current time
    pub fn new(id: String, title: String, code: String, credits: u32) -> Self {
        let now = now_millis();
        Self {
            id,
            title,
            code,
            credits,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Current time truncated to the millisecond precision the store keeps
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Course attributes that list queries may filter or sort on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Title,
    Code,
    Credits,
    CreatedAt,
    UpdatedAt,
}

impl CourseField {
    /// Fields matched by the free-text `searchTerm`
    pub const SEARCHABLE: [CourseField; 2] = [CourseField::Title, CourseField::Code];

    /// Fields accepted as exact-match filters
    pub const FILTERABLE: [CourseField; 3] =
        [CourseField::Title, CourseField::Code, CourseField::Credits];

    /// Name used on the wire (query parameters, JSON)
    pub fn api_name(self) -> &'static str {
        match self {
            CourseField::Title => "title",
            CourseField::Code => "code",
            CourseField::Credits => "credits",
            CourseField::CreatedAt => "createdAt",
            CourseField::UpdatedAt => "updatedAt",
        }
    }

    /// Column name in the `courses` table
    pub fn column(self) -> &'static str {
        match self {
            CourseField::Title => "title",
            CourseField::Code => "code",
            CourseField::Credits => "credits",
            CourseField::CreatedAt => "created_at",
            CourseField::UpdatedAt => "updated_at",
        }
    }

    fn from_api_name(name: &str) -> Option<Self> {
        [
            CourseField::Title,
            CourseField::Code,
            CourseField::Credits,
            CourseField::CreatedAt,
            CourseField::UpdatedAt,
        ]
        .into_iter()
        .find(|f| f.api_name() == name || f.column() == name)
    }

    /// Resolve a filter key; only `FILTERABLE` fields are accepted
    pub fn filterable(name: &str) -> Result<Self> {
        Self::from_api_name(name)
            .filter(|f| Self::FILTERABLE.contains(f))
            .ok_or_else(|| CatalogError::UnknownFilterField {
                field: name.to_string(),
            })
    }

    /// Resolve a sort key; every course attribute is sortable
    pub fn sortable(name: &str) -> Result<Self> {
        Self::from_api_name(name).ok_or_else(|| CatalogError::UnknownSortField {
            field: name.to_string(),
        })
    }
}
