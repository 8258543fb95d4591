//! In-memory executors for unit tests

use crate::error::UpstreamError;
use crate::pagination::{FilterSet, PageQuery, QueryExecutor};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub(crate) fn day_data(token: &str, date: u64, volume_usd: f64) -> Value {
    json!({ "token": token, "date": date, "volumeUSD": volume_usd.to_string() })
}

pub(crate) fn pool(id: &str, token0: &str, token1: &str) -> Value {
    json!({ "id": id, "token0": token0, "token1": token1 })
}

pub(crate) fn swap_transaction(id: &str, block: u64, swap_ids: &[&str]) -> Value {
    let swaps: Vec<Value> = swap_ids.iter().map(|s| json!({ "id": s })).collect();
    json!({ "id": id, "blockNumber": block.to_string(), "swaps": swaps })
}

pub(crate) fn asset_transaction(id: &str, block: u64, pairs: &[(&str, &str)]) -> Value {
    let swaps: Vec<Value> = pairs
        .iter()
        .map(|(t0, t1)| json!({ "token0": { "id": t0 }, "token1": { "id": t1 } }))
        .collect();
    json!({ "id": id, "blockNumber": block.to_string(), "swaps": swaps })
}

/// Serves canned responses in order, then empty pages (or nothing at all)
pub(crate) struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<Vec<Value>, UpstreamError>>>,
    queries: Mutex<Vec<PageQuery>>,
    stall_when_done: bool,
}

impl ScriptedExecutor {
    pub(crate) fn new(script: Vec<Result<Vec<Value>, UpstreamError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            queries: Mutex::new(Vec::new()),
            stall_when_done: false,
        }
    }

    /// Like `new`, but never answers once the script runs out
    pub(crate) fn then_stall(script: Vec<Result<Vec<Value>, UpstreamError>>) -> Self {
        Self {
            stall_when_done: true,
            ..Self::new(script)
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub(crate) fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, query: &PageQuery) -> Result<Vec<Value>, UpstreamError> {
        self.queries.lock().unwrap().push(query.clone());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None if self.stall_when_done => std::future::pending().await,
            None => Ok(Vec::new()),
        }
    }
}

/// Never answers
pub(crate) struct StalledExecutor;

#[async_trait]
impl QueryExecutor for StalledExecutor {
    async fn execute(&self, _query: &PageQuery) -> Result<Vec<Value>, UpstreamError> {
        std::future::pending().await
    }
}

/// Tiny subgraph: honours the filter set, the sort field and `first`
pub(crate) struct FakeSubgraph {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    queries: Mutex<Vec<PageQuery>>,
    responses: Mutex<Vec<Vec<Value>>>,
}

impl FakeSubgraph {
    pub(crate) fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn insert(&self, collection: &str, record: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub(crate) fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub(crate) fn queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn responses(&self) -> Vec<Vec<Value>> {
        self.responses.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeSubgraph {
    async fn execute(&self, query: &PageQuery) -> Result<Vec<Value>, UpstreamError> {
        self.queries.lock().unwrap().push(query.clone());

        let mut records: Vec<Value> = self
            .collections
            .lock()
            .unwrap()
            .get(query.entity.collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| matches_filters(r, &query.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        records.sort_by(|a, b| compare_field(b, a, query.order_by));
        records.truncate(query.first);

        self.responses.lock().unwrap().push(records.clone());
        Ok(records)
    }
}

fn matches_filters(record: &Value, filters: &FilterSet) -> bool {
    let text = |field: &str| record.get(field).and_then(Value::as_str).map(str::to_string);
    let date = record.get("date").and_then(Value::as_u64);

    let equals = |field: &str, expected: &Option<String>| match expected {
        Some(value) => text(field).as_deref() == Some(value.as_str()),
        None => true,
    };

    equals("token", &filters.token)
        && equals("token0", &filters.token0)
        && equals("token1", &filters.token1)
        && equals("blockNumber", &filters.block_number.map(|b| b.to_string()))
        && filters.date_gt.map_or(true, |gt| date.is_some_and(|d| d > gt))
        && filters.date_lt.map_or(true, |lt| date.is_some_and(|d| d < lt))
        && filters
            .id_lt
            .as_ref()
            .map_or(true, |lt| text("id").is_some_and(|id| id.as_str() < lt.as_str()))
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_u64().unwrap_or(0).cmp(&y.as_u64().unwrap_or(0))
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
