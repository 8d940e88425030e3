//! Demo catalogue loaded at startup when seeding is enabled.

use chrono::{DateTime, TimeZone, Utc};
use eg_core::models::Event;

/// Three sample events in Chelyabinsk and Kopeysk. Their counters stand in
/// for interactions that happened before the process started.
pub fn demo_events() -> Vec<Event> {
    vec![
        demo(
            "1",
            "Philharmonic Concert",
            "The symphony orchestra performs classical works by Tchaikovsky and Beethoven",
            at(2023, 10, 15, 19),
            "Chelyabinsk",
            "Concerts",
            (42, 18),
        ),
        demo(
            "2",
            "Local Artists Exhibition",
            "Works by Kopeysk painters on display. Admission is free.",
            at(2023, 10, 20, 12),
            "Kopeysk",
            "Exhibitions",
            (28, 15),
        ),
        demo(
            "3",
            "Street Food Festival",
            "Taste dishes from the best chefs in town on the central square",
            at(2023, 10, 25, 10),
            "Chelyabinsk",
            "Festivals",
            (85, 120),
        ),
    ]
}

fn demo(
    id: &str,
    title: &str,
    description: &str,
    date: DateTime<Utc>,
    city: &str,
    category: &str,
    (likes, attending_count): (u32, u32),
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image_url: "/placeholder.svg".to_string(),
        date,
        city: city.to_string(),
        category: category.to_string(),
        price: None,
        likes,
        attending_count,
        created_by: Some("admin".to_string()),
        created_at: date,
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}
