//! Subgraph HTTP client
//!
//! One `GraphClient` is built at startup and shared by every request; it holds nothing
//! but the endpoint and a pooled `reqwest::Client`.
//!
//! ## Request shape
//!
//! ```text
//! POST {endpoint}
//! { "query": "query Page($first: Int!, $where: Pool_filter) { ... }",
//!   "variables": { "first": 100, "where": { "token0": "0x..." } } }
//! ```

use super::query::{build_request, extract_records, GraphQlResponse};
use crate::error::UpstreamError;
use crate::pagination::{PageQuery, QueryExecutor};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphClient {
    /// Build a client whose every round trip is bounded by `timeout`
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryExecutor for GraphClient {
    async fn execute(&self, query: &PageQuery) -> Result<Vec<Value>, UpstreamError> {
        let request = build_request(query);

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body: GraphQlResponse = response.json().await?;
        extract_records(body, query.entity.collection)
    }
}
