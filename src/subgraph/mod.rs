//! Uniswap v3 subgraph integration
//!
//! - `types` - Records decoded from subgraph pages
//! - `query` - GraphQL text and variables for a `PageQuery`
//! - `client` - reqwest-backed `QueryExecutor`

pub mod client;
pub mod query;
pub mod types;

pub use client::GraphClient;
pub use types::{AssetTransaction, Pool, SwapTransaction, TokenDayData};
