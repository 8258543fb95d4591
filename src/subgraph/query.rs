//! GraphQL rendering for page queries
//!
//! Only static entity metadata is written into the query text. Every caller-supplied
//! value travels in `variables`.

use crate::error::UpstreamError;
use crate::pagination::{FilterSet, PageQuery};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: String,
    pub variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
pub struct Variables<'a> {
    pub first: usize,
    #[serde(rename = "where")]
    pub filter: &'a FilterSet,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

pub fn render_query(query: &PageQuery) -> String {
    format!(
        "query Page($first: Int!, $where: {filter_type}) {{ {collection}(first: $first, orderBy: {order_by}, orderDirection: desc, where: $where) {{ {selection} }} }}",
        filter_type = query.entity.filter_type,
        collection = query.entity.collection,
        order_by = query.order_by,
        selection = query.entity.selection,
    )
}

pub fn build_request(query: &PageQuery) -> GraphQlRequest<'_> {
    GraphQlRequest {
        query: render_query(query),
        variables: Variables {
            first: query.first,
            filter: &query.filters,
        },
    }
}

/// Pull `data.<collection>` out of a response, surfacing GraphQL errors first
pub fn extract_records(
    response: GraphQlResponse,
    collection: &str,
) -> Result<Vec<Value>, UpstreamError> {
    if !response.errors.is_empty() {
        return Err(UpstreamError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match response.data.and_then(|mut data| data.remove(collection)) {
        Some(Value::Array(records)) => Ok(records),
        _ => Err(UpstreamError::MissingData(collection.to_string())),
    }
}
