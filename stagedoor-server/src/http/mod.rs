//! HTTP layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - HTML error pages with real status codes (mutations never report
//!   failure behind a 200)

pub mod error;
pub mod forms;
pub mod routes;
pub mod server;

pub use error::PageError;
pub use server::{run_server, ServerConfig};
