//! trekplan: trip catalog browsing and staged generative-AI trip planning.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DreamRun, TripPlanRun, adventure_blurb, ask_guide, browse_trips, gateway_factory,
    match_trips, packing_list, plan_trip, trip, trips, visualize_dream,
};
pub use app::pipeline::{PipelineRun, RunState};
pub use domain::{
    Alternative, AppConfig, AppError, Difficulty, DifficultyFilter, DreamRequest, ImageCard,
    MISSING_CREDENTIAL_MESSAGE, MapPoint, PackingList, PackingRequest, PipelineEvent, SortKey,
    TripFilters, TripPlannerRequest, TripRecord,
};
pub use ports::{AiGateway, AiGatewayFactory, GeneratedImage, MockGatewayFactory};

/// Load configuration from `path`, or from `trekplan.toml` when present.
pub fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig, AppError> {
    app::api::config(path)
}
