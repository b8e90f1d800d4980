//! API Facade for the application.
//!
//! Glues the embedded catalog, configuration and gateway selection to the
//! pipelines and one-shot services.

use std::path::Path;

use crate::adapters::{GeminiGatewayFactory, trip_catalog};
use crate::app::pipeline::{DreamContext, PipelineRun, TripPlannerContext, dream_run, trip_planner_run};
use crate::app::services;
use crate::domain::configuration::{load_config, resolve_api_key};
use crate::ports::{AiGatewayFactory, MockGatewayFactory};

pub use crate::domain::{
    AppConfig, AppError, DreamRequest, PackingList, PackingRequest, PipelineEvent, SortKey,
    TripFilters, TripPlannerRequest, TripRecord,
};

/// A trip-planner run over the embedded catalog.
pub type TripPlanRun = PipelineRun<TripPlannerContext<'static>>;
/// A dream-visualizer run.
pub type DreamRun = PipelineRun<DreamContext>;

/// Load configuration from `path`, or from `trekplan.toml` when present.
pub fn config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    load_config(path)
}

/// Choose the gateway: canned offline answers, or Gemini with the resolved key.
///
/// A missing key is not an error here; it surfaces when a generator runs.
pub fn gateway_factory(config: &AppConfig, mock: bool) -> Box<dyn AiGatewayFactory> {
    if mock {
        log::info!("Using the offline mock gateway");
        return Box::new(MockGatewayFactory);
    }
    let api_key = resolve_api_key(config);
    if api_key.is_none() {
        log::debug!("No API key configured");
    }
    Box::new(GeminiGatewayFactory::new(api_key, config.gemini.clone()))
}

/// The full catalog in display order.
pub fn trips() -> Result<&'static [TripRecord], AppError> {
    trip_catalog()
}

/// Look up one trip by id.
pub fn trip(id: &str) -> Result<&'static TripRecord, AppError> {
    crate::domain::find_trip(trip_catalog()?, id)
}

/// Filter and order the catalog for display.
pub fn browse_trips(
    filters: &TripFilters,
    sort: SortKey,
    ranking: Option<&[String]>,
) -> Result<Vec<&'static TripRecord>, AppError> {
    Ok(crate::domain::derive(trip_catalog()?, filters, sort, ranking))
}

/// Start a trip-planner run. Events are produced as the run is iterated.
pub fn plan_trip(
    factory: &dyn AiGatewayFactory,
    request: TripPlannerRequest,
) -> Result<TripPlanRun, AppError> {
    request.validate()?;
    Ok(trip_planner_run(factory, trip_catalog()?, request))
}

/// Start a dream-visualizer run.
pub fn visualize_dream(
    factory: &dyn AiGatewayFactory,
    request: DreamRequest,
) -> Result<DreamRun, AppError> {
    request.validate()?;
    Ok(dream_run(factory, request))
}

pub fn packing_list(
    factory: &dyn AiGatewayFactory,
    request: &PackingRequest,
) -> Result<PackingList, AppError> {
    services::packing_list(factory, trip_catalog()?, request)
}

/// Ranked catalog ids for a free-text wish; `None` when the wish is blank.
pub fn match_trips(
    factory: &dyn AiGatewayFactory,
    query: &str,
) -> Result<Option<Vec<String>>, AppError> {
    services::rank_trips(factory, trip_catalog()?, query)
}

pub fn ask_guide(factory: &dyn AiGatewayFactory, question: &str) -> Result<String, AppError> {
    services::ask_guide(factory, question)
}

pub fn adventure_blurb(factory: &dyn AiGatewayFactory, interest: &str) -> Result<String, AppError> {
    services::adventure_blurb(factory, interest)
}
