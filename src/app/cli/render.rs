//! Terminal rendering of catalog entries, run events and packing lists.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, PackingList, PipelineEvent, TripRecord};
use crate::ports::GeneratedImage;

/// Prints events as they arrive and optionally saves their images.
pub struct EventPrinter {
    json: bool,
    image_dir: Option<PathBuf>,
    file_prefix: &'static str,
    saved: usize,
    failed: bool,
}

impl EventPrinter {
    pub fn new(json: bool, image_dir: Option<PathBuf>, file_prefix: &'static str) -> Self {
        Self { json, image_dir, file_prefix, saved: 0, failed: false }
    }

    /// Whether an `Error` event was rendered.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn render(&mut self, event: &PipelineEvent) -> Result<(), AppError> {
        let saved = self.save_images(event)?;
        if let PipelineEvent::Error(message) = event {
            self.failed = true;
            if !self.json {
                eprintln!("Error: {}", message);
                return Ok(());
            }
        }

        if self.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", format_event(event, &saved));
        }
        Ok(())
    }

    fn save_images(&mut self, event: &PipelineEvent) -> Result<Vec<PathBuf>, AppError> {
        let Some(dir) = self.image_dir.clone() else {
            return Ok(Vec::new());
        };
        let urls: Vec<&str> = match event {
            PipelineEvent::Images(cards) => cards.iter().map(|card| card.url.as_str()).collect(),
            PipelineEvent::Image(card) => vec![card.url.as_str()],
            _ => return Ok(Vec::new()),
        };

        let mut paths = Vec::with_capacity(urls.len());
        for url in urls {
            let Some(image) = GeneratedImage::from_data_url(url) else {
                log::warn!("Skipping an image that is not a base64 data URL");
                continue;
            };
            self.saved += 1;
            paths.push(write_image(&dir, self.file_prefix, self.saved, &image)?);
        }
        Ok(paths)
    }
}

/// Write `image` as `<prefix>-<index>.<ext>` under `dir`, creating it if needed.
pub fn write_image(
    dir: &Path,
    prefix: &str,
    index: usize,
    image: &GeneratedImage,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-{}.{}", prefix, index, image.extension()));
    fs::write(&path, &image.data)?;
    log::info!("Saved image to {}", path.display());
    Ok(path)
}

/// Human-readable text for a non-error event. `saved` lists files written for it.
pub fn format_event(event: &PipelineEvent, saved: &[PathBuf]) -> String {
    let saved_note = |index: usize| match saved.get(index) {
        Some(path) => format!(" (saved to {})", path.display()),
        None => String::new(),
    };

    match event {
        PipelineEvent::Text(content) => format!("{}\n", content),
        PipelineEvent::Alternatives(alternatives) => {
            let mut out = String::from("Other adventures you might like:\n");
            for alternative in alternatives {
                out.push_str(&format!("  • {}: {}\n", alternative.title, alternative.description));
            }
            out
        }
        PipelineEvent::Map { center, zoom, points } => {
            let mut out = format!(
                "Route map (center {:.4}, {:.4}, zoom {}):\n",
                center.lat, center.lng, zoom
            );
            for (index, point) in points.iter().enumerate() {
                out.push_str(&format!(
                    "  {}. {} ({:.4}, {:.4})\n",
                    index + 1,
                    point.name,
                    point.lat,
                    point.lng
                ));
            }
            out
        }
        PipelineEvent::Images(cards) => {
            let mut out = String::from("Photographs:\n");
            for (index, card) in cards.iter().enumerate() {
                let description = card.description.as_deref().unwrap_or_default();
                out.push_str(&format!("  • {}: {}{}\n", card.title, description, saved_note(index)));
            }
            out
        }
        PipelineEvent::Image(card) => format!("Poster: {}{}\n", card.title, saved_note(0)),
        PipelineEvent::Error(message) => format!("Error: {}", message),
    }
}

/// One summary line per trip.
pub fn format_trip_row(trip: &TripRecord) -> String {
    format!(
        "{:<28} {:>3} days  {:<12}  {}",
        trip.id,
        trip.duration,
        trip.difficulty.as_str(),
        trip.name
    )
}

pub fn format_trip_detail(trip: &TripRecord) -> String {
    let mut out = format!(
        "{}\n{}\n\n{}\n\nDuration: {} days\nDifficulty: {}\nBest season: {}\n\nItinerary:\n",
        trip.name,
        trip.short_description,
        trip.long_description,
        trip.duration,
        trip.difficulty,
        trip.best_season
    );
    for waypoint in &trip.itinerary {
        out.push_str(&format!("  Day {}: {} - {}\n", waypoint.day, waypoint.title, waypoint.description));
    }
    if !trip.included.is_empty() {
        out.push_str("\nIncluded:\n");
        for item in &trip.included {
            out.push_str(&format!("  ✓ {}\n", item));
        }
    }
    if !trip.excluded.is_empty() {
        out.push_str("\nNot included:\n");
        for item in &trip.excluded {
            out.push_str(&format!("  ✗ {}\n", item));
        }
    }
    out
}

pub fn format_packing_list(list: &PackingList) -> String {
    let mut out = String::new();
    for category in &list.packing_list {
        out.push_str(&format!("{}\n", category.category_name));
        for item in &category.items {
            out.push_str(&format!("  • {} ({})", item.item_name, item.quantity));
            if !item.notes.trim().is_empty() {
                out.push_str(&format!(" - {}", item.notes.trim()));
            }
            out.push('\n');
        }
    }
    out
}
