//! In-memory user registry service
//!
//! Exposes create, read, update and delete operations over user records held
//! in process memory, behind a placeholder query-flag access gate.

pub mod doc;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
