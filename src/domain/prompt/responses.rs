//! Typed results of structured generation, each paired with its schema.

use serde::Deserialize;

use crate::domain::prompt::ResponseSchema;
use crate::domain::{Alternative, Coordinates, MapPoint};

/// Upper bound on alternatives shown next to a recommendation.
pub const MAX_ALTERNATIVES: usize = 2;
/// Upper bound on waypoints placed on the recommendation map.
pub const MAX_MAP_POINTS: usize = 7;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlternativesResponse {
    pub alternatives: Vec<Alternative>,
}

impl AlternativesResponse {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::object([(
            "alternatives",
            ResponseSchema::array(ResponseSchema::object([
                ("title", ResponseSchema::string().describe("Name of the alternative trip")),
                ("description", ResponseSchema::string().describe("Why it suits the traveller")),
            ])),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapResponse {
    pub center: Coordinates,
    /// Kept as a float; models sometimes answer `7.5`.
    pub zoom: f64,
    pub points: Vec<MapPoint>,
}

impl MapResponse {
    /// Zoom level as a map widget expects it.
    pub fn zoom_level(&self) -> u8 {
        self.zoom.round().clamp(1.0, 20.0) as u8
    }

    pub fn schema() -> ResponseSchema {
        let coordinates = || {
            ResponseSchema::object([
                ("lat", ResponseSchema::number().describe("Latitude in decimal degrees")),
                ("lng", ResponseSchema::number().describe("Longitude in decimal degrees")),
            ])
        };
        ResponseSchema::object([
            ("center", coordinates()),
            ("zoom", ResponseSchema::integer().describe("Map zoom level between 5 and 12")),
            (
                "points",
                ResponseSchema::array(ResponseSchema::object([
                    ("name", ResponseSchema::string()),
                    ("lat", ResponseSchema::number()),
                    ("lng", ResponseSchema::number()),
                ])),
            ),
        ])
    }
}

/// Caption plus generation prompt for one picture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagePromptDescriptor {
    pub title: String,
    pub description: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePromptsResponse {
    pub image_prompts: Vec<ImagePromptDescriptor>,
}

impl ImagePromptsResponse {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::object([(
            "imagePrompts",
            ResponseSchema::array(ResponseSchema::object([
                ("title", ResponseSchema::string().describe("Short title of the photograph")),
                ("description", ResponseSchema::string().describe("One-sentence caption")),
                ("prompt", ResponseSchema::string().describe("Detailed image-generation prompt")),
            ])),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub ranked_ids: Vec<String>,
}

impl RankingResponse {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::object([(
            "rankedIds",
            ResponseSchema::array(ResponseSchema::string())
                .describe("Expedition ids from best to worst match"),
        )])
    }
}
