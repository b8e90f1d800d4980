pub mod catalog_embedded;
pub mod gemini_client_http;

pub use catalog_embedded::{parse_catalog, trip_catalog};
pub use gemini_client_http::{GeminiGatewayFactory, HttpGeminiClient};
