//! # Event Rules
//!
//! Field checks applied to an event before it is stored, both on create and
//! on the merged result of an update.

use crate::error::{AppError, Result};
use crate::models::Event;

pub const MAX_TITLE_CHARS: usize = 200;

/// Deployment-specific constraints on event fields.
#[derive(Debug, Clone, Default)]
pub struct EventRules {
    /// When non-empty, `Event::city` must be one of these (case-insensitive).
    pub supported_cities: Vec<String>,
}

impl EventRules {
    pub fn with_cities<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_cities: cities.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates `event` in place. Text fields are stored trimmed, and a
    /// supported city is rewritten to its configured spelling so listings
    /// stay consistent.
    pub fn check(&self, event: &mut Event) -> Result<()> {
        trim_in_place(&mut event.title);
        trim_in_place(&mut event.category);
        trim_in_place(&mut event.city);
        trim_in_place(&mut event.image_url);

        if event.title.is_empty() {
            return Err(invalid("title must not be empty"));
        }
        if event.title.chars().count() > MAX_TITLE_CHARS {
            return Err(invalid(&format!("title must be at most {} characters", MAX_TITLE_CHARS)));
        }
        if event.category.is_empty() {
            return Err(invalid("category must not be empty"));
        }

        if event.city.is_empty() {
            return Err(invalid("city must not be empty"));
        }
        if !self.supported_cities.is_empty() {
            let wanted = event.city.to_lowercase();
            let canonical = self
                .supported_cities
                .iter()
                .find(|c| c.to_lowercase() == wanted)
                .ok_or_else(|| invalid(&format!("city '{}' is not supported", event.city)))?;
            event.city = canonical.clone();
        }

        if !is_image_ref(&event.image_url) {
            return Err(invalid("imageUrl must be empty, an absolute path or an http(s) URL"));
        }

        Ok(())
    }
}

fn trim_in_place(field: &mut String) {
    if field.trim().len() != field.len() {
        *field = field.trim().to_string();
    }
}

fn is_image_ref(url: &str) -> bool {
    url.is_empty()
        || url.starts_with('/')
        || url.starts_with("http://")
        || url.starts_with("https://")
}

fn invalid(msg: &str) -> AppError {
    AppError::ValidationError(msg.to_string())
}
