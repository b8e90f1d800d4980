//! Results emitted by pipeline runs and one-shot generators.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// A trip suggested next to the main recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub title: String,
    pub description: String,
}

/// A named location extracted from generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// A displayable generated image with its caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCard {
    /// `data:` URL carrying the encoded image.
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One incremental result of a pipeline run.
///
/// `Error` is always the last event of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PipelineEvent {
    Text(String),
    Alternatives(Vec<Alternative>),
    Map { center: Coordinates, zoom: u8, points: Vec<MapPoint> },
    Images(Vec<ImageCard>),
    Image(ImageCard),
    Error(String),
}

impl PipelineEvent {
    pub fn is_error(&self) -> bool {
        matches!(self, PipelineEvent::Error(_))
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineEvent::Text(_) => "text",
            PipelineEvent::Alternatives(_) => "alternatives",
            PipelineEvent::Map { .. } => "map",
            PipelineEvent::Images(_) => "images",
            PipelineEvent::Image(_) => "image",
            PipelineEvent::Error(_) => "error",
        }
    }
}
