//! Generative AI gateway port definition.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::domain::AppError;
use crate::domain::prompt::ResponseSchema;

/// Binary image returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// Encode as a `data:` URL that any browser or viewer can display.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (mime_type, payload) = rest.split_once(";base64,")?;
        let data = STANDARD.decode(payload).ok()?;
        Some(Self { mime_type: mime_type.to_string(), data })
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

/// Port for generative text and image operations.
///
/// Any failure (transport, auth, quota, timeout) is reported as an error; callers
/// do not distinguish between them.
pub trait AiGateway {
    /// Generate free text from a prompt.
    fn generate_text(&self, prompt: &str, system_instruction: Option<&str>)
    -> Result<String, AppError>;

    /// Generate a JSON value that conforms to `schema`.
    fn generate_structured(&self, prompt: &str, schema: &ResponseSchema) -> Result<Value, AppError>;

    /// Generate `count` images from a single prompt.
    fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        aspect_ratio: &str,
    ) -> Result<Vec<GeneratedImage>, AppError>;
}

/// Creates gateways; fails when no usable credential is available.
pub trait AiGatewayFactory {
    fn create(&self) -> Result<Box<dyn AiGateway>, AppError>;
}

/// Offline gateway returning canned content, for demos and CLI tests.
#[derive(Debug, Clone, Default)]
pub struct MockAiGateway;

/// 1x1 white JPEG.
const MOCK_JPEG: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00, 0x01,
    0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

impl AiGateway for MockAiGateway {
    fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AppError> {
        log::info!("MOCK MODE: generating text for a {} char prompt", prompt.len());
        if system_instruction.is_some() {
            return Ok("Askari says: train with long uphill walks carrying a loaded pack, \
                       and arrive in Skardu a few days early to acclimatize."
                .to_string());
        }
        if prompt.contains("movie poster") {
            return Ok("A cinematic portrait of Baltit Fort at golden hour above terraced \
                       fields, Rakaposhi glowing behind it."
                .to_string());
        }
        if prompt.contains("dream adventure") {
            return Ok("Forts and Valleys of Hunza\n\
                       Day 1: Arrive in Karimabad and watch sunset over Rakaposhi.\n\
                       Day 2: Explore Baltit and Altit Forts.\n\
                       Day 3: Hike to the Ultar Meadows."
                .to_string());
        }
        if prompt.contains("A visitor is interested in") {
            return Ok("Picture yourself beneath towering Karakoram walls, tea in hand, \
                       as the valley turns gold. Find your trip with us."
                .to_string());
        }
        Ok("Hunza Valley Cultural Trek\n\
            Why It's a Great Fit: gentle days in Karimabad with views of Rakaposhi.\n\
            Trip Highlights:\n\
            * Baltit Fort\n\
            * Attabad Lake\n\
            Fitness Advisory: comfortable for most walkers."
            .to_string())
    }

    fn generate_structured(&self, prompt: &str, schema: &ResponseSchema) -> Result<Value, AppError> {
        log::info!("MOCK MODE: generating structured output for a {} char prompt", prompt.len());
        let root = schema.property_names().next().unwrap_or_default();
        let value = match root {
            "alternatives" => json!({"alternatives": [
                {"title": "Nanga Parbat Base Camp Trek", "description": "Fairy Meadows and the Raikot Face."}
            ]}),
            "center" => json!({
                "center": {"lat": 36.33, "lng": 74.7},
                "zoom": 9,
                "points": [
                    {"name": "Karimabad", "lat": 36.326, "lng": 74.668},
                    {"name": "Attabad Lake", "lat": 36.31, "lng": 74.86}
                ]
            }),
            "imagePrompts" => json!({"imagePrompts": [
                {"title": "Baltit Fort", "description": "The fort at dawn.", "prompt": "Baltit Fort at dawn"},
                {"title": "Attabad Lake", "description": "Turquoise water.", "prompt": "Attabad Lake at noon"}
            ]}),
            "rankedIds" => json!({"rankedIds": [
                "hunza-valley-cultural-trek", "nanga-parbat-base-camp", "k2-base-camp-gondogoro-la"
            ]}),
            "packingList" => json!({"packingList": [
                {"categoryName": "Clothing", "items": [
                    {"itemName": "Down jacket", "quantity": "1", "notes": "Cold evenings in camp."}
                ]}
            ]}),
            other => {
                return Err(AppError::gateway(
                    format!("Mock gateway has no response for '{}'", other),
                    None,
                ));
            }
        };
        Ok(value)
    }

    fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        aspect_ratio: &str,
    ) -> Result<Vec<GeneratedImage>, AppError> {
        log::info!(
            "MOCK MODE: generating {} image(s) at {} for a {} char prompt",
            count,
            aspect_ratio,
            prompt.len()
        );
        Ok((0..count)
            .map(|_| GeneratedImage { mime_type: "image/jpeg".to_string(), data: MOCK_JPEG.to_vec() })
            .collect())
    }
}

/// Factory that always hands out a [`MockAiGateway`].
#[derive(Debug, Clone, Default)]
pub struct MockGatewayFactory;

impl AiGatewayFactory for MockGatewayFactory {
    fn create(&self) -> Result<Box<dyn AiGateway>, AppError> {
        Ok(Box::new(MockAiGateway))
    }
}
