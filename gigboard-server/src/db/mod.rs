//! Database layer - connection pool, schema, repositories
//!
//! # Design Principles
//!
//! - Connection pool passed explicitly - no global session
//! - Show counts and counterparts come from JOINs - no N+1 queries
//! - One transaction per mutation, rolled back on any failure
//! - Foreign keys cascade: deleting a venue or artist removes its shows

pub mod pool;
pub mod migrations;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
