//! event-guide/crates/eg-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the Event Guide.

pub mod models;
pub mod dates;
pub mod traits;
pub mod error;
pub mod filter;
pub mod guard;
pub mod interaction;
pub mod validation;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use filter::EventFilter;
pub use interaction::CounterDelta;
pub use validation::EventRules;


#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::{TimeZone, Utc};

    fn jazz_night() -> Event {
        let date = Utc.with_ymd_and_hms(2024, 8, 10, 19, 0, 0).unwrap();
        Event {
            id: "42".to_string(),
            title: "Jazz Night".to_string(),
            description: "Live quartet".to_string(),
            image_url: "/placeholder.svg".to_string(),
            date,
            city: "Kazan".to_string(),
            category: "Concert".to_string(),
            price: Some("Free".to_string()),
            likes: 3,
            attending_count: 2,
            created_by: Some("admin".to_string()),
            created_at: date,
        }
    }

    #[test]
    fn test_event_view_serializes_flat_camel_case() {
        let record = InteractionRecord {
            user_id: "u1".into(),
            event_id: "42".into(),
            liked: true,
            status: Some(AttendanceStatus::NotAttending),
        };
        let json = serde_json::to_value(EventView::new(jazz_night(), Some(&record))).unwrap();

        assert_eq!(json["id"], "42");
        assert_eq!(json["imageUrl"], "/placeholder.svg");
        assert_eq!(json["attendingCount"], 2);
        assert_eq!(json["userLiked"], true);
        assert_eq!(json["userStatus"], "notAttending");
    }

    #[test]
    fn test_anonymous_view_has_no_user_state() {
        let view = EventView::new(jazz_night(), None);
        assert!(!view.user_liked);
        assert_eq!(view.user_status, None);
    }

    #[test]
    fn test_patch_never_touches_identity_or_counters() {
        let mut event = jazz_night();
        let patch = EventPatch {
            title: Some("Jazz Night II".into()),
            price: Some(String::new()),
            ..Default::default()
        };
        patch.apply_to(&mut event);

        assert_eq!(event.title, "Jazz Night II");
        assert_eq!(event.price, None);
        assert_eq!(event.id, "42");
        assert_eq!(event.likes, 3);
        assert_eq!(event.attending_count, 2);
        assert_eq!(event.created_by.as_deref(), Some("admin"));
    }
}
