use std::collections::HashSet;

use crate::app::pipeline::decode;
use crate::domain::prompt::{RankingResponse, ranking_prompt};
use crate::domain::{AppError, TripRecord};
use crate::ports::AiGatewayFactory;

/// Rank catalog trips against a free-text wish.
///
/// Returns `None` for a blank query. Ids the catalog does not know are
/// dropped and repeats keep their first position.
pub fn rank_trips(
    factory: &dyn AiGatewayFactory,
    catalog: &[TripRecord],
    query: &str,
) -> Result<Option<Vec<String>>, AppError> {
    if query.trim().is_empty() {
        return Ok(None);
    }
    let gateway = factory.create()?;

    let structured = ranking_prompt(query, catalog)?;
    let value = gateway.generate_structured(&structured.prompt, &structured.schema)?;
    let response: RankingResponse = decode("ranking", value)?;

    let known: HashSet<&str> = catalog.iter().map(|trip| trip.id.as_str()).collect();
    let mut seen = HashSet::new();
    let ranked: Vec<String> = response
        .ranked_ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| known.contains(id) && seen.insert(*id))
        .map(ToOwned::to_owned)
        .collect();

    let dropped = response.ranked_ids.len() - ranked.len();
    if dropped > 0 {
        log::warn!("Ignored {} unknown or repeated id(s) in the ranking", dropped);
    }
    Ok(Some(ranked))
}
