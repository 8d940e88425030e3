//! # Event Filter
//!
//! Criteria the UI sends with a listing request. Present criteria are ANDed;
//! blank text criteria are treated as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Event;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    /// Case-insensitive exact match
    pub city: Option<String>,
    /// Case-insensitive exact match
    pub category: Option<String>,
    /// Inclusive lower bound on `Event::date`
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `Event::date`
    pub to_date: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the title or the description
    pub search_query: Option<String>,
}

impl EventFilter {
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn from_date(mut self, from: DateTime<Utc>) -> Self {
        self.from_date = Some(from);
        self
    }

    pub fn to_date(mut self, to: DateTime<Utc>) -> Self {
        self.to_date = Some(to);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(city) = active(&self.city) {
            if event.city.to_lowercase() != city {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            if event.category.to_lowercase() != category {
                return false;
            }
        }

        if self.from_date.is_some_and(|from| event.date < from) {
            return false;
        }
        if self.to_date.is_some_and(|to| event.date > to) {
            return false;
        }

        if let Some(query) = active(&self.search_query) {
            return event.title.to_lowercase().contains(&query)
                || event.description.to_lowercase().contains(&query);
        }

        true
    }
}

/// Lower-cased criterion, or `None` when missing or blank.
fn active(criterion: &Option<String>) -> Option<String> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str, description: &str, city: &str, category: &str, date: DateTime<Utc>) -> Event {
        Event {
            id: title.to_lowercase(),
            title: title.into(),
            description: description.into(),
            image_url: String::new(),
            date,
            city: city.into(),
            category: category.into(),
            price: None,
            likes: 0,
            attending_count: 0,
            created_by: None,
            created_at: date,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let e = event("Jazz Night", "", "Kazan", "Concert", day(2024, 8, 10));
        assert!(EventFilter::default().matches(&e));
    }

    #[test]
    fn city_and_category_ignore_case() {
        let e = event("Jazz Night", "", "Kazan", "Concert", day(2024, 8, 10));
        assert!(EventFilter::default().city("KAZAN").matches(&e));
        assert!(EventFilter::default().category("concert").matches(&e));
        assert!(!EventFilter::default().city("Moscow").matches(&e));
        assert!(!EventFilter::default().city("Kaz").matches(&e));
    }

    #[test]
    fn cyrillic_city_ignores_case() {
        let e = event("Концерт", "", "Челябинск", "Концерты", day(2023, 10, 15));
        assert!(EventFilter::default().city("челябинск").matches(&e));
    }

    #[test]
    fn blank_criteria_are_ignored() {
        let e = event("Jazz Night", "", "Kazan", "Concert", day(2024, 8, 10));
        let filter = EventFilter::default().city("").category("   ").search("");
        assert!(filter.matches(&e));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let date = day(2024, 8, 10);
        let e = event("Jazz Night", "", "Kazan", "Concert", date);
        assert!(EventFilter::default().from_date(date).to_date(date).matches(&e));
        assert!(!EventFilter::default().from_date(day(2024, 8, 11)).matches(&e));
        assert!(!EventFilter::default().to_date(day(2024, 8, 9)).matches(&e));
    }

    #[test]
    fn search_covers_title_or_description() {
        let e = event("Jazz Night", "Live saxophone quartet", "Kazan", "Concert", day(2024, 8, 10));
        assert!(EventFilter::default().search("jazz").matches(&e));
        assert!(EventFilter::default().search("SAXOPHONE").matches(&e));
        assert!(!EventFilter::default().search("opera").matches(&e));
    }

    #[test]
    fn criteria_are_anded() {
        let e = event("Jazz Night", "", "Kazan", "Concert", day(2024, 8, 10));
        let filter = EventFilter::default().city("Kazan").category("Exhibition");
        assert!(!filter.matches(&e));
    }
}
