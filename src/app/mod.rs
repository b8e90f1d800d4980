pub mod api;
pub mod cli;
pub mod pipeline;
pub mod services;
