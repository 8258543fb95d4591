//! # uniflow
//!
//! REST facade over the Uniswap v3 subgraph. Every endpoint is answered by walking the
//! subgraph's cursor-paginated collections and folding the pages into one JSON payload.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request → api (validation) → DexQueries
//!     ↓
//! PaginationDriver ── CursorStrategy (date_lt / id_lt)
//!     ↓                  ↓
//! QueryExecutor      Aggregator (Sum, OrderedCollect, DedupSet)
//!     ↓
//! GraphClient → subgraph endpoint
//! ```
//!
//! ## Module Organization
//!
//! - `pagination` - Paging engine: pages, cursors, aggregators, driver
//! - `subgraph` - Record types, query rendering and the reqwest-backed executor
//! - `operations` - The four aggregation queries served by the API
//! - `api` - axum router, handlers and request validation
//! - `config` - Environment configuration

#[cfg(test)]
pub(crate) mod testing;

pub mod api;
pub mod config;
pub mod error;
pub mod operations;
pub mod pagination;
pub mod subgraph;

pub use config::ApiConfig;
pub use error::{QueryError, UpstreamError};
pub use operations::DexQueries;
