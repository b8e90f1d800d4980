//! Dream visualizer: itinerary text followed by a poster image.

use crate::app::pipeline::{PipelineRun, Stage, StageOutcome};
use crate::domain::prompt::{dream_image_prompt, dream_itinerary_prompt};
use crate::domain::{AppError, DreamRequest, ImageCard, PipelineEvent};
use crate::ports::{AiGateway, AiGatewayFactory};

pub const POSTER_ASPECT_RATIO: &str = "3:4";
const FALLBACK_TITLE: &str = "Your Dream Adventure";

#[derive(Debug, Clone)]
pub struct DreamContext {
    pub request: DreamRequest,
    pub itinerary: String,
    pub image_prompt: String,
}

pub fn dream_run(factory: &dyn AiGatewayFactory, request: DreamRequest) -> PipelineRun<DreamContext> {
    let context = DreamContext { request, itinerary: String::new(), image_prompt: String::new() };
    let stages = vec![
        Stage::new("itinerary", write_itinerary),
        Stage::new("poster prompt", write_poster_prompt),
        Stage::new("poster", paint_poster),
    ];
    PipelineRun::new("dream", factory, stages, context)
}

/// First non-empty line of the itinerary, without markdown decoration.
pub fn itinerary_title(itinerary: &str) -> String {
    itinerary
        .lines()
        .map(|line| line.trim().trim_matches(|c: char| c == '#' || c == '*').trim())
        .find(|line| !line.is_empty())
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}

fn write_itinerary(gateway: &dyn AiGateway, ctx: &mut DreamContext) -> Result<StageOutcome, AppError> {
    let prompt = dream_itinerary_prompt(&ctx.request)?;
    let text = gateway.generate_text(&prompt, None)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::decode("itinerary", "the model returned no text"));
    }
    ctx.itinerary = text.to_string();
    Ok(StageOutcome::Emit(PipelineEvent::Text(ctx.itinerary.clone())))
}

fn write_poster_prompt(
    gateway: &dyn AiGateway,
    ctx: &mut DreamContext,
) -> Result<StageOutcome, AppError> {
    let prompt = dream_image_prompt(&ctx.request, &ctx.itinerary)?;
    let text = gateway.generate_text(&prompt, None)?;
    if text.trim().is_empty() {
        return Err(AppError::decode("poster prompt", "the model returned no text"));
    }
    ctx.image_prompt = text.trim().to_string();
    Ok(StageOutcome::Skip)
}

fn paint_poster(gateway: &dyn AiGateway, ctx: &mut DreamContext) -> Result<StageOutcome, AppError> {
    let image = gateway
        .generate_images(&ctx.image_prompt, 1, POSTER_ASPECT_RATIO)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::gateway("No images were generated", None))?;

    Ok(StageOutcome::Emit(PipelineEvent::Image(ImageCard {
        url: image.to_data_url(),
        title: itinerary_title(&ctx.itinerary),
        description: None,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MISSING_CREDENTIAL_MESSAGE;
    use crate::testing::{FakeAiGateway, FakeGatewayFactory, GatewayCall};

    const ITINERARY: &str = "\n**Forts of Hunza**\nDay 1: Baltit Fort.\nDay 2: Altit Fort.";

    fn run_with(fake: &FakeAiGateway) -> Vec<PipelineEvent> {
        let factory = FakeGatewayFactory::new(fake.clone());
        dream_run(&factory, DreamRequest::new("ancient forts and green valleys")).collect()
    }

    #[test]
    fn emits_itinerary_then_titled_poster() {
        let fake = FakeAiGateway::new()
            .with_text(ITINERARY)
            .with_text("A golden fort above terraced fields")
            .with_images(1);

        let events = run_with(&fake);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], PipelineEvent::Text(ITINERARY.trim().to_string()));
        match &events[1] {
            PipelineEvent::Image(card) => {
                assert_eq!(card.title, "Forts of Hunza");
                assert!(card.url.starts_with("data:image/jpeg;base64,"));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let calls = fake.calls();
        assert!(calls[0].prompt().contains("ancient forts and green valleys"));
        assert!(calls[1].prompt().contains("Day 2: Altit Fort."));
        assert_eq!(
            calls[2],
            GatewayCall::Images {
                prompt: "A golden fort above terraced fields".to_string(),
                count: 1,
                aspect_ratio: "3:4".to_string(),
            }
        );
    }

    #[test]
    fn image_failure_keeps_itinerary_and_ends_with_error() {
        let fake = FakeAiGateway::new()
            .with_text(ITINERARY)
            .with_text("poster")
            .with_image_error("Imagen quota exceeded");

        let events = run_with(&fake);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], PipelineEvent::Error("Imagen quota exceeded".into()));
    }

    #[test]
    fn missing_credential_yields_exactly_one_error() {
        let factory = FakeGatewayFactory::without_credential();
        let events: Vec<_> = dream_run(&factory, DreamRequest::new("glaciers")).collect();
        assert_eq!(events, vec![PipelineEvent::Error(MISSING_CREDENTIAL_MESSAGE.to_string())]);
    }

    #[test]
    fn title_falls_back_when_itinerary_is_decoration_only() {
        assert_eq!(itinerary_title("## \n***\n"), FALLBACK_TITLE);
        assert_eq!(itinerary_title("# Deosai Plains\nDay 1"), "Deosai Plains");
    }
}
