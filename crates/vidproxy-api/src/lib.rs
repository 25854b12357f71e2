//! vidproxy API Library
//!
//! HTTP handlers and application setup for the video upload proxy.

mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod api_doc;
pub mod error;
pub mod setup;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;
