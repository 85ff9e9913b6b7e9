//! Dashboard HTTP API: serves the engine's views over the latest campaign list.

#![warn(clippy::unwrap_used)]

pub mod refresh;
pub mod rest;
pub mod server;
pub mod state;

pub use server::{router, ApiServer};
pub use state::AppState;
