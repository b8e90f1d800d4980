//! Prompt builders for every generation step.
//!
//! Each builder is a pure function of its inputs: the same request and prior
//! text always yield the same prompt and schema.

use minijinja::context;

use crate::domain::prompt::{
    AlternativesResponse, ImagePromptDescriptor, ImagePromptsResponse, MAX_MAP_POINTS,
    MapResponse, PromptError, RankingResponse, ResponseSchema, render_prompt,
};
use crate::domain::{DreamRequest, PackingRequest, TripPlannerRequest, TripRecord};

/// Prompt text plus the response shape the gateway must enforce.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub prompt: String,
    pub schema: ResponseSchema,
}

/// Stage 1 of the trip planner: a single recommendation from the catalog.
pub fn recommendation_prompt(
    request: &TripPlannerRequest,
    catalog: &[TripRecord],
) -> Result<String, PromptError> {
    let catalog = catalog.iter().map(TripRecord::context_line).collect::<Vec<_>>().join("\n");
    render_prompt(
        "recommendation.j2",
        context! {
            duration => request.duration_days,
            fitness => request.fitness.as_str(),
            interests => request.interests.trim(),
            catalog => catalog,
        },
    )
}

/// Stage 2: alternatives that must not repeat the recommendation.
pub fn alternatives_prompt(
    request: &TripPlannerRequest,
    recommendation: &str,
) -> Result<StructuredPrompt, PromptError> {
    let prompt = render_prompt(
        "alternatives.j2",
        context! {
            duration => request.duration_days,
            fitness => request.fitness.as_str(),
            interests => request.interests.trim(),
            recommendation => recommendation.trim(),
        },
    )?;
    Ok(StructuredPrompt { prompt, schema: AlternativesResponse::schema() })
}

/// Stage 3: locations mentioned in the recommendation.
pub fn map_prompt(recommendation: &str) -> Result<StructuredPrompt, PromptError> {
    let prompt = render_prompt(
        "map.j2",
        context! { recommendation => recommendation.trim(), max_points => MAX_MAP_POINTS },
    )?;
    Ok(StructuredPrompt { prompt, schema: MapResponse::schema() })
}

/// Stage 4: two photograph descriptors for the recommendation.
pub fn image_prompts_prompt(recommendation: &str) -> Result<StructuredPrompt, PromptError> {
    let prompt =
        render_prompt("image_prompts.j2", context! { recommendation => recommendation.trim() })?;
    Ok(StructuredPrompt { prompt, schema: ImagePromptsResponse::schema() })
}

/// Stage 5: one image request covering every descriptor.
pub fn combined_image_prompt(descriptors: &[ImagePromptDescriptor]) -> String {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| format!("Image {}: {}", index + 1, descriptor.prompt.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Dream stage 1: a short titled itinerary.
pub fn dream_itinerary_prompt(request: &DreamRequest) -> Result<String, PromptError> {
    render_prompt("dream_itinerary.j2", context! { dream => request.dream.trim() })
}

/// Dream stage 2: a poster prompt built from the dream and its itinerary.
pub fn dream_image_prompt(request: &DreamRequest, itinerary: &str) -> Result<String, PromptError> {
    render_prompt(
        "dream_image.j2",
        context! { dream => request.dream.trim(), itinerary => itinerary.trim() },
    )
}

pub fn packing_list_prompt(
    request: &PackingRequest,
    trip: &TripRecord,
) -> Result<StructuredPrompt, PromptError> {
    let notes = match request.notes.trim() {
        "" => "None",
        notes => notes,
    };
    let prompt = render_prompt(
        "packing_list.j2",
        context! {
            trip_name => trip.name.as_str(),
            duration => trip.duration,
            difficulty => trip.difficulty.as_str(),
            description => trip.short_description.as_str(),
            best_season => trip.best_season.as_str(),
            season => request.season.trim(),
            included => trip.included.join(", "),
            notes => notes,
        },
    )?;
    Ok(StructuredPrompt { prompt, schema: packing_list_schema() })
}

fn packing_list_schema() -> ResponseSchema {
    ResponseSchema::object([(
        "packingList",
        ResponseSchema::array(ResponseSchema::object([
            ("categoryName", ResponseSchema::string()),
            (
                "items",
                ResponseSchema::array(ResponseSchema::object([
                    ("itemName", ResponseSchema::string()),
                    ("quantity", ResponseSchema::string()),
                    ("notes", ResponseSchema::string()),
                ])),
            ),
        ])),
    )])
}

/// Matchmaker: rank catalog ids against a free-text query.
pub fn ranking_prompt(query: &str, catalog: &[TripRecord]) -> Result<StructuredPrompt, PromptError> {
    let catalog = catalog
        .iter()
        .map(|trip| {
            format!(
                "{} | {} | {} days | {} | {}",
                trip.id, trip.name, trip.duration, trip.difficulty, trip.short_description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = render_prompt("ranking.j2", context! { query => query.trim(), catalog => catalog })?;
    Ok(StructuredPrompt { prompt, schema: RankingResponse::schema() })
}

pub fn adventure_blurb_prompt(interest: &str) -> Result<String, PromptError> {
    render_prompt("adventure_blurb.j2", context! { interest => interest.trim() })
}

/// Persona for the ask-a-guide feature.
pub fn guide_system_instruction() -> Result<String, PromptError> {
    render_prompt("guide_system.j2", context! {})
}
