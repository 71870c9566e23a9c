//! Web server module
//!
//! Exposes the research tools over a JSON HTTP API, so an agent running in
//! another process can call them.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
