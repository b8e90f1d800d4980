//! Filtering and ordering of the trip catalog for display.
//!
//! Everything here is a pure function of its inputs: the catalog is never
//! mutated and the result can be recomputed on every change of criteria.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::{AppError, Difficulty, TripRecord};

/// Difficulty predicate: either any level or one exact level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    Any,
    Exactly(Difficulty),
}

impl DifficultyFilter {
    fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::Any => true,
            DifficultyFilter::Exactly(wanted) => *wanted == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("any") {
            return Ok(DifficultyFilter::Any);
        }
        trimmed.parse::<Difficulty>().map(DifficultyFilter::Exactly)
    }
}

/// User-selected filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripFilters {
    pub difficulty: DifficultyFilter,
    /// Inclusive upper bound on trip length in days.
    pub max_duration: u32,
}

impl Default for TripFilters {
    fn default() -> Self {
        Self { difficulty: DifficultyFilter::Any, max_duration: DEFAULT_MAX_DURATION }
    }
}

/// Upper end of the duration slider.
pub const DEFAULT_MAX_DURATION: u32 = 30;

/// Manual sort order, ignored whenever a ranking is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    DurationAsc,
    DurationDesc,
    DifficultyAsc,
    DifficultyDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::DurationAsc,
        SortKey::DurationDesc,
        SortKey::DifficultyAsc,
        SortKey::DifficultyDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::DurationAsc => "duration-asc",
            SortKey::DurationDesc => "duration-desc",
            SortKey::DifficultyAsc => "difficulty-asc",
            SortKey::DifficultyDesc => "difficulty-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| AppError::InvalidSortKey(s.to_string()))
    }
}

/// Derive the displayed list of trips.
///
/// Filters by difficulty and maximum duration, then orders by `ranking` when
/// present (ranked ids first in ranking order, unranked trips after them in
/// catalog order), otherwise by `sort`.
pub fn derive<'a>(
    catalog: &'a [TripRecord],
    filters: &TripFilters,
    sort: SortKey,
    ranking: Option<&[String]>,
) -> Vec<&'a TripRecord> {
    let mut trips: Vec<&TripRecord> = catalog
        .iter()
        .filter(|trip| filters.difficulty.matches(trip.difficulty))
        .filter(|trip| trip.duration <= filters.max_duration)
        .collect();

    if let Some(ranking) = ranking {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for (index, id) in ranking.iter().enumerate() {
            positions.entry(id.as_str()).or_insert(index);
        }
        // sort_by_key is stable, so unranked trips keep catalog order.
        trips.sort_by_key(|trip| positions.get(trip.id.as_str()).copied().unwrap_or(usize::MAX));
        return trips;
    }

    match sort {
        SortKey::Default => {}
        SortKey::DurationAsc => trips.sort_by_key(|trip| trip.duration),
        SortKey::DurationDesc => trips.sort_by(|a, b| b.duration.cmp(&a.duration)),
        SortKey::DifficultyAsc => trips.sort_by_key(|trip| trip.difficulty),
        SortKey::DifficultyDesc => trips.sort_by(|a, b| b.difficulty.cmp(&a.difficulty)),
    }
    trips
}
