use crate::domain::{Coordinates, Difficulty, ItineraryWaypoint, TripRecord};

/// A catalog entry with predictable text derived from `id`.
pub fn sample_trip(id: &str, duration: u32, difficulty: Difficulty) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        name: format!("Trip {}", id),
        short_description: format!("Short {}", id),
        long_description: format!("Long description of {}", id),
        duration,
        difficulty,
        best_season: "June to September".to_string(),
        image: format!("https://example.com/{}.jpg", id),
        gallery: vec![],
        map_center: Coordinates { lat: 35.5, lng: 75.0 },
        map_zoom: 8,
        itinerary: vec![
            ItineraryWaypoint {
                day: 1,
                title: "Arrival in Islamabad".to_string(),
                description: "Transfer and briefing.".to_string(),
                coordinates: Some(Coordinates { lat: 33.6844, lng: 73.0479 }),
            },
            ItineraryWaypoint {
                day: 2,
                title: "Fly north".to_string(),
                description: "Scenic flight.".to_string(),
                coordinates: Some(Coordinates { lat: 35.2971, lng: 75.6333 }),
            },
        ],
        included: vec!["Guide".to_string(), "Permits".to_string()],
        excluded: vec!["International flights".to_string()],
    }
}

/// Mirrors the shipped catalog's ids, durations and difficulties, in order.
pub fn sample_catalog() -> Vec<TripRecord> {
    vec![
        sample_trip("k2-base-camp-gondogoro-la", 21, Difficulty::Expert),
        sample_trip("nanga-parbat-base-camp", 14, Difficulty::Advanced),
        sample_trip("hunza-valley-cultural-trek", 10, Difficulty::Beginner),
    ]
}
