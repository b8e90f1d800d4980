//! Trip catalog loaded from the embedded `catalog.yaml` asset.

use std::collections::HashSet;
use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use serde::Deserialize;

use crate::domain::{AppError, TripRecord};

static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

const CATALOG_FILE: &str = "catalog.yaml";

static CATALOG: OnceLock<Result<Vec<TripRecord>, String>> = OnceLock::new();

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    trips: Vec<TripRecord>,
}

/// The operator's trip catalog, parsed once per process.
pub fn trip_catalog() -> Result<&'static [TripRecord], AppError> {
    CATALOG
        .get_or_init(|| load_embedded().map_err(|e| e.to_string()))
        .as_deref()
        .map_err(|reason| AppError::Catalog(reason.clone()))
}

fn load_embedded() -> Result<Vec<TripRecord>, AppError> {
    let file = ASSETS_DIR
        .get_file(CATALOG_FILE)
        .ok_or_else(|| AppError::Catalog(format!("{} is missing", CATALOG_FILE)))?;
    let content = file
        .contents_utf8()
        .ok_or_else(|| AppError::Catalog(format!("{} is not valid UTF-8", CATALOG_FILE)))?;
    parse_catalog(content)
}

/// Parse and validate catalog YAML.
pub fn parse_catalog(content: &str) -> Result<Vec<TripRecord>, AppError> {
    let parsed: CatalogFile =
        serde_yaml::from_str(content).map_err(|e| AppError::Catalog(e.to_string()))?;

    let mut seen = HashSet::new();
    for trip in &parsed.trips {
        if trip.id.trim().is_empty() {
            return Err(AppError::Catalog("trip id must not be empty".to_string()));
        }
        if !seen.insert(trip.id.as_str()) {
            return Err(AppError::Catalog(format!("duplicate trip id '{}'", trip.id)));
        }
        if trip.name.trim().is_empty() {
            return Err(AppError::Catalog(format!("trip '{}' has no name", trip.id)));
        }
        if trip.duration == 0 {
            return Err(AppError::Catalog(format!("trip '{}' has a zero duration", trip.id)));
        }
    }

    log::debug!("Loaded {} trips from catalog", parsed.trips.len());
    Ok(parsed.trips)
}
