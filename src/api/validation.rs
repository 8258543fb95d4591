//! Request input validation
//!
//! Everything here runs before any upstream query is issued.

use crate::pagination::TimeRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidAddress(String),
    InvalidHash(String),
    InvalidNumber { name: &'static str, value: String },
    InvalidRange { start: u64, end: u64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidAddress(_) => write!(f, "Invalid asset id"),
            ValidationError::InvalidHash(_) => write!(f, "Invalid transaction hash"),
            ValidationError::InvalidNumber { name, value } => {
                write!(f, "Invalid {} '{}'", name, value)
            }
            ValidationError::InvalidRange { .. } => {
                write!(f, "Invalid parameters: end must not precede start")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// `0x` followed by exactly `bytes * 2` hex digits, either case
fn is_prefixed_hex(value: &str, bytes: usize) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => digits.len() == bytes * 2 && hex::decode(digits).is_ok(),
        None => false,
    }
}

/// 20-byte account address
pub fn valid_address(value: &str) -> bool {
    is_prefixed_hex(value, 20)
}

/// 32-byte transaction hash
pub fn valid_hash(value: &str) -> bool {
    is_prefixed_hex(value, 32)
}

/// Validate an asset id and normalize it to the subgraph's lowercase form
pub fn parse_address(value: &str) -> Result<String, ValidationError> {
    if valid_address(value) {
        Ok(value.to_ascii_lowercase())
    } else {
        Err(ValidationError::InvalidAddress(value.to_string()))
    }
}

pub fn parse_hash(value: &str) -> Result<String, ValidationError> {
    if valid_hash(value) {
        Ok(value.to_ascii_lowercase())
    } else {
        Err(ValidationError::InvalidHash(value.to_string()))
    }
}

/// Plain decimal u64: no sign, no whitespace
pub fn parse_u64(name: &'static str, value: &str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        name,
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

pub fn parse_block_number(value: &str) -> Result<u64, ValidationError> {
    parse_u64("block number", value)
}

/// Build a volume window from optional `start`/`end` query values
///
/// Missing or empty values leave that side open.
pub fn parse_time_range(start: Option<&str>, end: Option<&str>) -> Result<TimeRange, ValidationError> {
    let start = match start.filter(|s| !s.is_empty()) {
        Some(value) => Some(parse_u64("start time", value)?),
        None => None,
    };
    let end = match end.filter(|s| !s.is_empty()) {
        Some(value) => Some(parse_u64("end time", value)?),
        None => None,
    };

    let range = TimeRange::new(start, end);
    if !range.is_ordered() {
        return Err(ValidationError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(range)
}
