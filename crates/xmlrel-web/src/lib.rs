//! HTTP interface for xmlrel
//!
//! Thin plumbing around [`xmlrel_core`]: upload validation, query-string
//! extraction, JSON encoding and status-code mapping.

pub mod routes;
pub mod server;

mod error;
mod schemas;
mod state;

pub use error::{Result, WebError};
pub use schemas::{TagAttributesResponse, TagCountResponse};
pub use server::{build_router, start_server};
pub use state::AppState;
