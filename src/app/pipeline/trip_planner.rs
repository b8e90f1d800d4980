//! Personalized trip planner: recommendation, alternatives, map, photographs.

use crate::app::pipeline::{PipelineRun, Stage, StageOutcome, decode};
use crate::domain::prompt::{
    AlternativesResponse, ImagePromptDescriptor, ImagePromptsResponse, MAX_ALTERNATIVES,
    MAX_MAP_POINTS, MapResponse, alternatives_prompt, combined_image_prompt,
    image_prompts_prompt, map_prompt, recommendation_prompt,
};
use crate::domain::{AppError, ImageCard, PipelineEvent, TripPlannerRequest, TripRecord};
use crate::ports::{AiGateway, AiGatewayFactory};

/// Photographs generated per plan.
pub const PLANNER_IMAGE_COUNT: u32 = 2;
pub const PLANNER_ASPECT_RATIO: &str = "4:3";

/// State threaded through a trip-planner run.
#[derive(Debug, Clone)]
pub struct TripPlannerContext<'a> {
    pub catalog: &'a [TripRecord],
    pub request: TripPlannerRequest,
    /// Stage 1 text; every later prompt is built from it.
    pub recommendation: String,
    pub image_prompts: Vec<ImagePromptDescriptor>,
}

/// Build a planner run. Nothing is sent until the run is iterated.
pub fn trip_planner_run<'a>(
    factory: &dyn AiGatewayFactory,
    catalog: &'a [TripRecord],
    request: TripPlannerRequest,
) -> PipelineRun<TripPlannerContext<'a>> {
    let context = TripPlannerContext {
        catalog,
        request,
        recommendation: String::new(),
        image_prompts: Vec::new(),
    };
    let stages = vec![
        Stage::new("recommendation", recommend),
        Stage::new("alternatives", suggest_alternatives),
        Stage::new("map", extract_map),
        Stage::new("image prompts", describe_images),
        Stage::new("images", generate_images),
    ];
    PipelineRun::new("trip planner", factory, stages, context)
}

fn recommend(
    gateway: &dyn AiGateway,
    ctx: &mut TripPlannerContext<'_>,
) -> Result<StageOutcome, AppError> {
    let prompt = recommendation_prompt(&ctx.request, ctx.catalog)?;
    let text = gateway.generate_text(&prompt, None)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::decode("recommendation", "the model returned no text"));
    }
    ctx.recommendation = text.to_string();
    Ok(StageOutcome::Emit(PipelineEvent::Text(ctx.recommendation.clone())))
}

fn suggest_alternatives(
    gateway: &dyn AiGateway,
    ctx: &mut TripPlannerContext<'_>,
) -> Result<StageOutcome, AppError> {
    let structured = alternatives_prompt(&ctx.request, &ctx.recommendation)?;
    let value = gateway.generate_structured(&structured.prompt, &structured.schema)?;
    let mut response: AlternativesResponse = decode("alternatives", value)?;

    response.alternatives.retain(|alternative| !alternative.title.trim().is_empty());
    response.alternatives.truncate(MAX_ALTERNATIVES);
    if response.alternatives.is_empty() {
        return Ok(StageOutcome::Skip);
    }
    Ok(StageOutcome::Emit(PipelineEvent::Alternatives(response.alternatives)))
}

fn extract_map(
    gateway: &dyn AiGateway,
    ctx: &mut TripPlannerContext<'_>,
) -> Result<StageOutcome, AppError> {
    let structured = map_prompt(&ctx.recommendation)?;
    let value = gateway.generate_structured(&structured.prompt, &structured.schema)?;
    let mut response: MapResponse = decode("map", value)?;

    response.points.truncate(MAX_MAP_POINTS);
    if response.points.is_empty() {
        return Ok(StageOutcome::Skip);
    }
    let zoom = response.zoom_level();
    Ok(StageOutcome::Emit(PipelineEvent::Map {
        center: response.center,
        zoom,
        points: response.points,
    }))
}

fn describe_images(
    gateway: &dyn AiGateway,
    ctx: &mut TripPlannerContext<'_>,
) -> Result<StageOutcome, AppError> {
    let structured = image_prompts_prompt(&ctx.recommendation)?;
    let value = gateway.generate_structured(&structured.prompt, &structured.schema)?;
    let mut response: ImagePromptsResponse = decode("image prompts", value)?;

    let wanted = PLANNER_IMAGE_COUNT as usize;
    if response.image_prompts.len() < wanted {
        return Err(AppError::decode(
            "image prompts",
            format!("expected {} descriptions, got {}", wanted, response.image_prompts.len()),
        ));
    }
    response.image_prompts.truncate(wanted);
    ctx.image_prompts = response.image_prompts;
    Ok(StageOutcome::Skip)
}

/// Asks for [`PLANNER_IMAGE_COUNT`] photographs and pairs them with the
/// descriptions by position. A partial answer still emits the cards that
/// arrived; only an empty answer fails the stage.
fn generate_images(
    gateway: &dyn AiGateway,
    ctx: &mut TripPlannerContext<'_>,
) -> Result<StageOutcome, AppError> {
    let prompt = combined_image_prompt(&ctx.image_prompts);
    let images = gateway.generate_images(&prompt, PLANNER_IMAGE_COUNT, PLANNER_ASPECT_RATIO)?;
    if images.is_empty() {
        return Err(AppError::gateway("No images were generated", None));
    }

    let cards = ctx
        .image_prompts
        .iter()
        .zip(images)
        .map(|(descriptor, image)| ImageCard {
            url: image.to_data_url(),
            title: descriptor.title.clone(),
            description: Some(descriptor.description.clone()),
        })
        .collect();
    Ok(StageOutcome::Emit(PipelineEvent::Images(cards)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, MISSING_CREDENTIAL_MESSAGE};
    use crate::testing::{FakeAiGateway, FakeGatewayFactory, GatewayCall, sample_catalog};
    use serde_json::{Value, json};

    const RECOMMENDATION: &str = "Hunza Valley Cultural Trek\nPerfect for culture lovers.";

    fn request() -> TripPlannerRequest {
        TripPlannerRequest {
            duration_days: 10,
            fitness: Difficulty::Beginner,
            interests: "culture, forts".to_string(),
        }
    }

    fn alternatives(count: usize) -> Value {
        let items: Vec<Value> = (0..count)
            .map(|i| json!({"title": format!("Alt {}", i), "description": "Nice"}))
            .collect();
        json!({ "alternatives": items })
    }

    fn map(points: usize) -> Value {
        let items: Vec<Value> = (0..points)
            .map(|i| json!({"name": format!("Point {}", i), "lat": 36.0, "lng": 74.0 + i as f64}))
            .collect();
        json!({"center": {"lat": 36.3, "lng": 74.7}, "zoom": 9, "points": items})
    }

    fn image_prompts(count: usize) -> Value {
        let items: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "title": format!("Photo {}", i),
                    "description": format!("Caption {}", i),
                    "prompt": format!("Prompt {}", i)
                })
            })
            .collect();
        json!({ "imagePrompts": items })
    }

    fn run_with(fake: &FakeAiGateway) -> Vec<PipelineEvent> {
        let catalog = sample_catalog();
        let factory = FakeGatewayFactory::new(fake.clone());
        trip_planner_run(&factory, &catalog, request()).collect()
    }

    #[test]
    fn full_run_emits_every_event_in_order() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(3))
            .with_structured(map(9))
            .with_structured(image_prompts(2))
            .with_images(2);

        let events = run_with(&fake);
        let kinds: Vec<_> = events.iter().map(PipelineEvent::kind).collect();
        assert_eq!(kinds, vec!["text", "alternatives", "map", "images"]);

        assert_eq!(events[0], PipelineEvent::Text(RECOMMENDATION.to_string()));
        match &events[1] {
            PipelineEvent::Alternatives(items) => assert_eq!(items.len(), MAX_ALTERNATIVES),
            other => panic!("unexpected event: {:?}", other),
        }
        match &events[2] {
            PipelineEvent::Map { zoom, points, .. } => {
                assert_eq!(*zoom, 9);
                assert_eq!(points.len(), MAX_MAP_POINTS);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match &events[3] {
            PipelineEvent::Images(cards) => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].title, "Photo 0");
                assert_eq!(cards[1].description.as_deref(), Some("Caption 1"));
                assert!(cards[0].url.starts_with("data:image/jpeg;base64,"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn later_stages_receive_the_recommendation() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(map(1))
            .with_structured(image_prompts(2))
            .with_images(2);
        run_with(&fake);

        let calls = fake.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls[0].prompt().contains("Trip hunza-valley-cultural-trek"));
        for call in &calls[1..4] {
            assert!(call.prompt().contains("Hunza Valley Cultural Trek"));
        }
        assert_eq!(
            calls[4],
            GatewayCall::Images {
                prompt: "Image 1: Prompt 0\n\nImage 2: Prompt 1".to_string(),
                count: 2,
                aspect_ratio: "4:3".to_string(),
            }
        );
    }

    #[test]
    fn empty_alternatives_are_skipped_and_map_still_runs() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(0))
            .with_structured(map(2))
            .with_structured(image_prompts(2))
            .with_images(2);

        let kinds: Vec<_> = run_with(&fake).iter().map(PipelineEvent::kind).collect();
        assert_eq!(kinds, vec!["text", "map", "images"]);
        assert_eq!(fake.calls().len(), 5);
    }

    #[test]
    fn map_without_points_is_skipped() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(map(0))
            .with_structured(image_prompts(2))
            .with_images(2);

        let kinds: Vec<_> = run_with(&fake).iter().map(PipelineEvent::kind).collect();
        assert_eq!(kinds, vec!["text", "alternatives", "images"]);
    }

    #[test]
    fn malformed_structured_response_ends_the_run() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(json!({"alternatives": "not a list"}));

        let events = run_with(&fake);
        assert_eq!(events.len(), 2);
        match &events[1] {
            PipelineEvent::Error(message) => assert!(message.contains("alternatives response")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(fake.calls().len(), 2);
    }

    #[test]
    fn alternatives_answer_without_its_key_ends_the_run() {
        let fake = FakeAiGateway::new().with_text(RECOMMENDATION).with_structured(json!({}));

        let events = run_with(&fake);
        let kinds: Vec<_> = events.iter().map(PipelineEvent::kind).collect();
        assert_eq!(kinds, vec!["text", "error"]);
        match &events[1] {
            PipelineEvent::Error(message) => assert!(message.contains("missing field `alternatives`")),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(fake.calls().len(), 2);
    }

    #[test]
    fn map_answer_without_points_ends_the_run() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(json!({"center": {"lat": 36.3, "lng": 74.7}, "zoom": 9}));

        let kinds: Vec<_> = run_with(&fake).iter().map(PipelineEvent::kind).collect();
        assert_eq!(kinds, vec!["text", "alternatives", "error"]);
        assert_eq!(fake.calls().len(), 3);
    }

    #[test]
    fn gateway_failure_mid_run_is_terminal() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured_error("Resource has been exhausted");

        let events = run_with(&fake);
        assert_eq!(events.last(), Some(&PipelineEvent::Error("Resource has been exhausted".into())));
        assert_eq!(events.len(), 3);
        assert_eq!(fake.calls().len(), 3);
    }

    #[test]
    fn missing_credential_yields_exactly_one_error() {
        let catalog = sample_catalog();
        let factory = FakeGatewayFactory::without_credential();
        let events: Vec<_> = trip_planner_run(&factory, &catalog, request()).collect();
        assert_eq!(events, vec![PipelineEvent::Error(MISSING_CREDENTIAL_MESSAGE.to_string())]);
    }

    #[test]
    fn a_single_image_description_fails_before_generating_images() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(map(1))
            .with_structured(image_prompts(1));

        let events = run_with(&fake);
        assert!(events.last().is_some_and(PipelineEvent::is_error));
        assert!(!fake.calls().iter().any(|call| matches!(call, GatewayCall::Images { .. })));
    }

    #[test]
    fn zero_images_is_a_failure() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(map(1))
            .with_structured(image_prompts(2))
            .with_images(0);

        let events = run_with(&fake);
        assert_eq!(events.last(), Some(&PipelineEvent::Error("No images were generated".into())));
    }

    #[test]
    fn fewer_images_than_descriptions_pairs_what_arrived() {
        let fake = FakeAiGateway::new()
            .with_text(RECOMMENDATION)
            .with_structured(alternatives(1))
            .with_structured(map(1))
            .with_structured(image_prompts(3))
            .with_images(1);

        match run_with(&fake).last() {
            Some(PipelineEvent::Images(cards)) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].title, "Photo 0");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn blank_recommendation_ends_the_run() {
        let fake = FakeAiGateway::new().with_text("   \n");
        let events = run_with(&fake);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_error());
    }
}
