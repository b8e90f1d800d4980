mod ai_gateway;

pub use ai_gateway::{AiGateway, AiGatewayFactory, GeneratedImage, MockAiGateway, MockGatewayFactory};
