use crate::app::pipeline::decode;
use crate::domain::prompt::packing_list_prompt;
use crate::domain::{AppError, PackingList, PackingRequest, TripRecord, find_trip};
use crate::ports::AiGatewayFactory;

/// Generate a categorized packing list for one catalog trip.
///
/// The trip is looked up before any credential is needed.
pub fn packing_list(
    factory: &dyn AiGatewayFactory,
    catalog: &[TripRecord],
    request: &PackingRequest,
) -> Result<PackingList, AppError> {
    let trip = find_trip(catalog, &request.trip_id)?;
    let gateway = factory.create()?;

    let structured = packing_list_prompt(request, trip)?;
    let value = gateway.generate_structured(&structured.prompt, &structured.schema)?;
    let list: PackingList = decode("packing list", value)?;

    log::info!(
        "Packing list for {}: {} categories, {} items",
        trip.id,
        list.packing_list.len(),
        list.item_count()
    );
    Ok(list)
}
