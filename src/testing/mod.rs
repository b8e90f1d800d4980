mod fake_ai_gateway;
mod trip_builder;

pub use fake_ai_gateway::{FakeAiGateway, FakeGatewayFactory, GatewayCall};
pub use trip_builder::{sample_catalog, sample_trip};
