//! stagedoor-server: HTTP server for the Stagedoor booking directory
//!
//! Server-rendered directory of venues, artists, and the shows that pair
//! them. Handlers live under [`http::routes`], persistence under [`db`],
//! and the askama templates under [`views`].

pub mod db;
pub mod http;
pub mod models;
pub mod state;
pub mod views;

pub use http::{run_server, ServerConfig};
pub use state::AppState;
