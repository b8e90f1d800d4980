//! Single-call generators that return a value instead of a run.

mod guide;
mod matchmaker;
mod packing_advisor;

pub use guide::{adventure_blurb, ask_guide};
pub use matchmaker::rank_trips;
pub use packing_advisor::packing_list;
