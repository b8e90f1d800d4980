//! Trip catalog domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Physical demand of a trip, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// All levels in ascending order.
    pub const ALL: [Difficulty; 4] =
        [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced, Difficulty::Expert];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }

    /// Parse a level name, ignoring case.
    pub fn from_label(label: &str) -> Option<Difficulty> {
        match label.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::from_label(s).ok_or_else(|| AppError::InvalidDifficulty(s.to_string()))
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One day (or day range start) of a trip itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryWaypoint {
    pub day: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// An immutable trip offered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TripRecord {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    /// Length of the trip in days.
    pub duration: u32,
    pub difficulty: Difficulty,
    pub best_season: String,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub map_center: Coordinates,
    pub map_zoom: u8,
    pub itinerary: Vec<ItineraryWaypoint>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl TripRecord {
    /// One-line summary used when the catalog is handed to the model as context.
    pub fn context_line(&self) -> String {
        format!(
            "- {}: Duration {} days, Difficulty {}, Description: {}",
            self.name, self.duration, self.difficulty, self.short_description
        )
    }
}

/// Look up a trip by id.
pub fn find_trip<'a>(catalog: &'a [TripRecord], id: &str) -> Result<&'a TripRecord, AppError> {
    catalog.iter().find(|trip| trip.id == id).ok_or_else(|| AppError::UnknownTrip(id.to_string()))
}
