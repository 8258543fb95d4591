//! Structured upstream filters
//!
//! A `FilterSet` is serialized as the GraphQL `$where` variable. Unset fields are
//! omitted entirely, which is how "no bound" is expressed to the upstream.

use serde::{Serialize, Serializer};

/// Sentinel for an open lower time bound
pub const MIN_TIMESTAMP: u64 = 0;

/// Sentinel for an open upper time bound
pub const MAX_TIMESTAMP: u64 = u64::MAX;

/// Largest value the subgraph accepts for an `Int` filter argument
pub const MAX_GRAPHQL_INT: u64 = i32::MAX as u64;

/// Exclusive bound on an ordering field, derived from the last record of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorFilter {
    DateGt(u64),
    DateLt(u64),
    IdLt(String),
}

/// Filter value object for one page query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token1: Option<String>,
    /// BigInt on the subgraph side, so it travels as a decimal string
    #[serde(
        rename = "blockNumber",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_big_int"
    )]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_gt: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_lt: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_lt: Option<String>,
}

impl FilterSet {
    /// Day data rows of one token within `range`
    pub fn for_token(token: &str, range: TimeRange) -> Self {
        let mut filters = Self {
            token: Some(token.to_string()),
            ..Self::default()
        };
        filters.apply_time_range(range);
        filters
    }

    /// Pools whose `token0` is `token`
    pub fn for_token0(token: &str) -> Self {
        Self {
            token0: Some(token.to_string()),
            ..Self::default()
        }
    }

    /// Pools whose `token1` is `token`
    pub fn for_token1(token: &str) -> Self {
        Self {
            token1: Some(token.to_string()),
            ..Self::default()
        }
    }

    /// Transactions mined in `block_number`
    pub fn for_block(block_number: u64) -> Self {
        Self {
            block_number: Some(block_number),
            ..Self::default()
        }
    }

    /// Set the time bounds, dropping sentinel values
    ///
    /// Day dates are `Int` upstream, so bounds past `i32::MAX` are clamped to it. No
    /// stored date can reach that value, which keeps the clamped window equivalent.
    pub fn apply_time_range(&mut self, range: TimeRange) {
        self.date_gt = (range.start != MIN_TIMESTAMP).then(|| range.start.min(MAX_GRAPHQL_INT));
        self.date_lt = (range.end != MAX_TIMESTAMP).then(|| range.end.min(MAX_GRAPHQL_INT));
    }

    /// Replace the bound on the cursor's field with the cursor's value
    pub fn apply_cursor(&mut self, cursor: CursorFilter) {
        match cursor {
            CursorFilter::DateGt(date) => self.date_gt = Some(date),
            CursorFilter::DateLt(date) => self.date_lt = Some(date),
            CursorFilter::IdLt(id) => self.id_lt = Some(id),
        }
    }
}

fn serialize_big_int<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Unix-second window `(start, end)`, open ends held as sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u64,
    pub end: u64,
}

impl TimeRange {
    pub fn unbounded() -> Self {
        Self {
            start: MIN_TIMESTAMP,
            end: MAX_TIMESTAMP,
        }
    }

    pub fn new(start: Option<u64>, end: Option<u64>) -> Self {
        Self {
            start: start.unwrap_or(MIN_TIMESTAMP),
            end: end.unwrap_or(MAX_TIMESTAMP),
        }
    }

    /// `end >= start`
    pub fn is_ordered(&self) -> bool {
        self.end >= self.start
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = if self.start == MIN_TIMESTAMP {
            "open".to_string()
        } else {
            format_timestamp(self.start)
        };
        let end = if self.end == MAX_TIMESTAMP {
            "open".to_string()
        } else {
            format_timestamp(self.end)
        };
        write!(f, "{} → {}", start, end)
    }
}

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| secs.to_string())
}
