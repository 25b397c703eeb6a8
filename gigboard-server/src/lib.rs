//! gigboard-server: venue, artist and show listings over HTTP
//!
//! Venues and artists are listed, searched, edited and deleted; shows link
//! one of each at a start time. Every mutation runs in its own transaction
//! and answers with a flash message instead of surfacing database errors.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError, DEFAULT_MAX_CONNECTIONS};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
