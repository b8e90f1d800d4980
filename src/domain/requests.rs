//! Per-submission inputs for the generators.

use crate::domain::{AppError, Difficulty};

/// Shortest and longest trip lengths offered by the planner form.
pub const MIN_PLAN_DAYS: u32 = 5;
pub const MAX_PLAN_DAYS: u32 = 30;

/// Preferences collected by the trip planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPlannerRequest {
    /// Approximate desired length in days.
    pub duration_days: u32,
    pub fitness: Difficulty,
    /// Free-text interests, e.g. "epic views, culture, not too crowded".
    pub interests: String,
}

impl TripPlannerRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_PLAN_DAYS..=MAX_PLAN_DAYS).contains(&self.duration_days) {
            return Err(AppError::InvalidRequest(format!(
                "duration must be between {} and {} days",
                MIN_PLAN_DAYS, MAX_PLAN_DAYS
            )));
        }
        Ok(())
    }
}

impl Default for TripPlannerRequest {
    fn default() -> Self {
        Self {
            duration_days: 14,
            fitness: Difficulty::Intermediate,
            interests: "epic views, culture, not too crowded".to_string(),
        }
    }
}

/// A free-text description of the adventure the user dreams of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DreamRequest {
    pub dream: String,
}

impl DreamRequest {
    pub fn new(dream: impl Into<String>) -> Self {
        Self { dream: dream.into() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.dream.trim().is_empty() {
            return Err(AppError::InvalidRequest("describe your dream adventure first".to_string()));
        }
        Ok(())
    }
}

/// Inputs for a packing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingRequest {
    pub trip_id: String,
    pub season: String,
    /// Optional personal notes ("I get cold easily").
    pub notes: String,
}
