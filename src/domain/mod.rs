pub mod browse;
pub mod catalog;
pub mod configuration;
pub mod error;
pub mod events;
pub mod packing;
pub mod prompt;
pub mod requests;

pub use browse::{DEFAULT_MAX_DURATION, DifficultyFilter, SortKey, TripFilters, derive};
pub use catalog::{Coordinates, Difficulty, ItineraryWaypoint, TripRecord, find_trip};
pub use configuration::{AppConfig, GeminiConfig};
pub use error::{AppError, MISSING_CREDENTIAL_MESSAGE};
pub use events::{Alternative, ImageCard, MapPoint, PipelineEvent};
pub use packing::{PackingCategory, PackingItem, PackingList};
pub use requests::{DreamRequest, MAX_PLAN_DAYS, MIN_PLAN_DAYS, PackingRequest, TripPlannerRequest};
