use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::AppError;
use crate::domain::prompt::ResponseSchema;
use crate::ports::{AiGateway, AiGatewayFactory, GeneratedImage};

/// A call received by [`FakeAiGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Text { prompt: String, system_instruction: Option<String> },
    Structured { prompt: String, root: String },
    Images { prompt: String, count: u32, aspect_ratio: String },
}

impl GatewayCall {
    pub fn prompt(&self) -> &str {
        match self {
            GatewayCall::Text { prompt, .. }
            | GatewayCall::Structured { prompt, .. }
            | GatewayCall::Images { prompt, .. } => prompt,
        }
    }
}

type Script<T> = Arc<Mutex<VecDeque<Result<T, String>>>>;

/// Gateway answering from per-operation queues and recording every call.
#[derive(Clone, Default)]
pub struct FakeAiGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    texts: Script<String>,
    structured: Script<Value>,
    images: Script<Vec<GeneratedImage>>,
}

impl FakeAiGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.texts.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn with_text_error(self, message: impl Into<String>) -> Self {
        self.texts.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn with_structured(self, value: Value) -> Self {
        self.structured.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn with_structured_error(self, message: impl Into<String>) -> Self {
        self.structured.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Queue `count` JPEG images whose bytes are their index.
    pub fn with_images(self, count: u8) -> Self {
        let images = (0..count)
            .map(|index| GeneratedImage { mime_type: "image/jpeg".to_string(), data: vec![index] })
            .collect();
        self.images.lock().unwrap().push_back(Ok(images));
        self
    }

    pub fn with_image_error(self, message: impl Into<String>) -> Self {
        self.images.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(&self, script: &Script<T>, operation: &str) -> Result<T, AppError> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(format!("no scripted {} response", operation)))
            .map_err(|message| AppError::gateway(message, None))
    }
}

impl AiGateway for FakeAiGateway {
    fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(GatewayCall::Text {
            prompt: prompt.to_string(),
            system_instruction: system_instruction.map(ToOwned::to_owned),
        });
        self.next(&self.texts, "text")
    }

    fn generate_structured(&self, prompt: &str, schema: &ResponseSchema) -> Result<Value, AppError> {
        self.calls.lock().unwrap().push(GatewayCall::Structured {
            prompt: prompt.to_string(),
            root: schema.property_names().next().unwrap_or_default().to_string(),
        });
        self.next(&self.structured, "structured")
    }

    fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        aspect_ratio: &str,
    ) -> Result<Vec<GeneratedImage>, AppError> {
        self.calls.lock().unwrap().push(GatewayCall::Images {
            prompt: prompt.to_string(),
            count,
            aspect_ratio: aspect_ratio.to_string(),
        });
        self.next(&self.images, "image")
    }
}

/// Hands out clones of one [`FakeAiGateway`], or fails like a missing key.
pub struct FakeGatewayFactory {
    gateway: Option<FakeAiGateway>,
}

impl FakeGatewayFactory {
    pub fn new(gateway: FakeAiGateway) -> Self {
        Self { gateway: Some(gateway) }
    }

    pub fn without_credential() -> Self {
        Self { gateway: None }
    }
}

impl AiGatewayFactory for FakeGatewayFactory {
    fn create(&self) -> Result<Box<dyn AiGateway>, AppError> {
        match &self.gateway {
            Some(gateway) => Ok(Box::new(gateway.clone())),
            None => Err(AppError::MissingCredential),
        }
    }
}
