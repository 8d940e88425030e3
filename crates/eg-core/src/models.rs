//! # Domain Models
//!
//! These structs represent the core entities of the Event Guide.
//! Field names serialize in camelCase because the browser UI consumes them as-is.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Category catalogue offered to admins when they create an event.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Concerts",
    "Exhibitions",
    "Festivals",
    "Sports",
    "Education",
    "Theatre",
    "Cinema",
    "Other",
];

/// A single advertised happening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque identifier, immutable after creation
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
    pub city: String,
    pub category: String,
    /// Free-text price label (e.g., "Free", "500 RUB")
    pub price: Option<String>,
    /// Derived from interaction records; only toggles change it
    pub likes: u32,
    /// Derived from interaction records; only toggles change it
    pub attending_count: u32,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin-supplied fields for a new event. Counters and ids are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// RFC 3339, or a plain `YYYY-MM-DD` meaning midnight UTC
    #[serde(deserialize_with = "crate::dates::deserialize")]
    pub date: DateTime<Utc>,
    pub city: String,
    pub category: String,
    #[serde(default)]
    pub price: Option<String>,
}

/// Partial update. Absent fields are left alone.
///
/// An empty `price` clears the label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "crate::dates::deserialize_opt")]
    pub date: Option<DateTime<Utc>>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

impl EventPatch {
    /// Merges the present fields into `event`. Identity and counters are untouched.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            event.image_url = image_url.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(city) = &self.city {
            event.city = city.clone();
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(price) = &self.price {
            event.price = if price.trim().is_empty() { None } else { Some(price.clone()) };
        }
    }
}

/// A user's stated intent to go to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    Attending,
    NotAttending,
}

/// One user's relationship to one event, keyed by `(user_id, event_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub user_id: String,
    pub event_id: String,
    pub liked: bool,
    /// `None` means no stated preference
    pub status: Option<AttendanceStatus>,
}

/// An event annotated with the requesting user's interaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub user_liked: bool,
    pub user_status: Option<AttendanceStatus>,
}

impl EventView {
    /// Without a record (anonymous caller, or no interaction yet) the state is unset.
    pub fn new(event: Event, record: Option<&InteractionRecord>) -> Self {
        Self {
            event,
            user_liked: record.map(|r| r.liked).unwrap_or(false),
            user_status: record.and_then(|r| r.status),
        }
    }
}

/// Identity supplied by the `AuthProvider` for each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

/// A logged-in identity and the bearer token that resolves to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: CurrentUser,
}
