//! Uniswap v3 subgraph record types

use crate::pagination::{Dated, EntitySpec, Identified, PagedRecord};
use serde::{Deserialize, Deserializer, Serialize};

/// Pool containing the queried asset on either side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
}

impl PagedRecord for Pool {
    const ENTITY: EntitySpec = EntitySpec {
        collection: "pools",
        filter_type: "Pool_filter",
        selection: "id",
    };
}

impl Identified for Pool {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Daily traded volume of one token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenDayData {
    /// Unix seconds at the start of the day
    pub date: u64,
    /// BigDecimal on the wire, usually a string
    #[serde(rename = "volumeUSD", deserialize_with = "deserialize_decimal")]
    pub volume_usd: f64,
}

impl PagedRecord for TokenDayData {
    const ENTITY: EntitySpec = EntitySpec {
        collection: "tokenDayDatas",
        filter_type: "TokenDayData_filter",
        selection: "date volumeUSD",
    };
}

impl Dated for TokenDayData {
    fn date(&self) -> u64 {
        self.date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapRef {
    pub id: String,
}

/// Transaction with the ids of its swaps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapTransaction {
    pub id: String,
    #[serde(default)]
    pub swaps: Vec<SwapRef>,
}

impl SwapTransaction {
    pub fn swap_ids(&self) -> Vec<String> {
        self.swaps.iter().map(|s| s.id.clone()).collect()
    }
}

impl PagedRecord for SwapTransaction {
    const ENTITY: EntitySpec = EntitySpec {
        collection: "transactions",
        filter_type: "Transaction_filter",
        selection: "id swaps { id }",
    };
}

impl Identified for SwapTransaction {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapTokens {
    pub token0: TokenRef,
    pub token1: TokenRef,
}

/// Transaction with both sides of each of its swaps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetTransaction {
    pub id: String,
    #[serde(default)]
    pub swaps: Vec<SwapTokens>,
}

impl AssetTransaction {
    /// `token0` and `token1` of every swap, duplicates included
    pub fn token_ids(&self) -> Vec<String> {
        self.swaps
            .iter()
            .flat_map(|s| [s.token0.id.clone(), s.token1.id.clone()])
            .collect()
    }
}

impl PagedRecord for AssetTransaction {
    const ENTITY: EntitySpec = EntitySpec {
        collection: "transactions",
        filter_type: "Transaction_filter",
        selection: "id swaps { token0 { id } token1 { id } }",
    };
}

impl Identified for AssetTransaction {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
        Decimal::Number(value) => Ok(value),
    }
}
