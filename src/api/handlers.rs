//! Route handlers
//!
//! Each handler validates its inputs, runs one `DexQueries` operation and encodes the
//! result as JSON.

use super::error::ApiError;
use super::validation::{parse_address, parse_block_number, parse_time_range};
use super::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct VolumeParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// `GET /assets/{asset_id}/pools`
pub async fn asset_pools(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
) -> Result<Response, ApiError> {
    let asset_id = parse_address(&asset_id)?;
    let pools = state.queries.asset_pools(&asset_id).await?;
    json_response(&pools)
}

/// `GET /assets/{asset_id}/volume?start=&end=`
pub async fn asset_volume(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
    Query(params): Query<VolumeParams>,
) -> Result<Response, ApiError> {
    let asset_id = parse_address(&asset_id)?;
    let range = parse_time_range(params.start.as_deref(), params.end.as_deref())?;
    let total = state.queries.asset_volume(&asset_id, range).await?;
    json_response(&total)
}

/// `GET /blocks/{block_number}/swaps`
pub async fn block_swaps(
    State(state): State<Arc<AppState>>,
    Path(block_number): Path<String>,
) -> Result<Response, ApiError> {
    let block_number = parse_block_number(&block_number)?;
    let swaps = state.queries.block_swaps(block_number).await?;
    json_response(&swaps)
}

/// `GET /blocks/{block_number}/swapped-assets`
pub async fn block_swapped_assets(
    State(state): State<Arc<AppState>>,
    Path(block_number): Path<String>,
) -> Result<Response, ApiError> {
    let block_number = parse_block_number(&block_number)?;
    let assets = state.queries.block_swapped_assets(block_number).await?;
    json_response(&assets)
}

fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
