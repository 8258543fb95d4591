//! The four aggregation queries behind the HTTP API
//!
//! | Operation | Collection | Cursor | Aggregator |
//! |---|---|---|---|
//! | `asset_pools` | `pools` (token0, then token1) | `id_lt` | OrderedCollect |
//! | `asset_volume` | `tokenDayDatas` | `date_lt` | Sum |
//! | `block_swaps` | `transactions` | `id_lt` | OrderedCollect |
//! | `block_swapped_assets` | `transactions` | `id_lt` | DedupSet |
//!
//! Callers pass validated, lowercase addresses. Every operation runs under the request
//! deadline; when it elapses the in-flight fetch is dropped and `QueryError::Cancelled`
//! is returned.

use crate::error::QueryError;
use crate::pagination::{
    DedupSet, FilterSet, IdDescending, OrderedCollect, PaginationDriver, QueryExecutor, Sum,
    TimeDescending, TimeRange, TotalVolume,
};
use crate::subgraph::types::{AssetTransaction, Pool, SwapTransaction, TokenDayData};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct DexQueries {
    executor: Arc<dyn QueryExecutor>,
    driver: PaginationDriver,
    deadline: Duration,
}

impl DexQueries {
    pub fn new(executor: Arc<dyn QueryExecutor>, driver: PaginationDriver, deadline: Duration) -> Self {
        Self {
            executor,
            driver,
            deadline,
        }
    }

    /// Pools with the asset as `token0`, followed by pools with it as `token1`
    pub async fn asset_pools(&self, asset_id: &str) -> Result<Vec<Pool>, QueryError> {
        self.with_deadline(self.collect_asset_pools(asset_id)).await
    }

    /// USD volume summed over the asset's day data inside `range`
    pub async fn asset_volume(&self, asset_id: &str, range: TimeRange) -> Result<TotalVolume, QueryError> {
        self.with_deadline(self.sum_asset_volume(asset_id, range)).await
    }

    /// Swap ids in the block, in upstream order (transaction id descending)
    pub async fn block_swaps(&self, block_number: u64) -> Result<Vec<String>, QueryError> {
        self.with_deadline(self.collect_block_swaps(block_number)).await
    }

    /// Distinct token addresses on either side of any swap in the block, unordered
    pub async fn block_swapped_assets(&self, block_number: u64) -> Result<Vec<String>, QueryError> {
        self.with_deadline(self.collect_block_assets(block_number)).await
    }

    async fn collect_asset_pools(&self, asset_id: &str) -> Result<Vec<Pool>, QueryError> {
        let mut pools = self.collect_pools(FilterSet::for_token0(asset_id)).await?;
        pools.extend(self.collect_pools(FilterSet::for_token1(asset_id)).await?);

        log::info!("🏊 {} pools for {}", pools.len(), asset_id);
        Ok(pools)
    }

    async fn collect_pools(&self, filters: FilterSet) -> Result<Vec<Pool>, QueryError> {
        self.driver
            .run::<Pool, _, _>(
                filters,
                self.executor.as_ref(),
                &IdDescending,
                OrderedCollect::new(|pool: &Pool| vec![pool.clone()]),
            )
            .await
    }

    async fn sum_asset_volume(&self, asset_id: &str, range: TimeRange) -> Result<TotalVolume, QueryError> {
        let total = self
            .driver
            .run::<TokenDayData, _, _>(
                FilterSet::for_token(asset_id, range),
                self.executor.as_ref(),
                &TimeDescending,
                Sum::new(|day: &TokenDayData| day.volume_usd),
            )
            .await?;

        log::info!(
            "📊 Volume for {} ({}): {:.2} USD",
            asset_id,
            range,
            total.total_volume_usd
        );
        Ok(total)
    }

    async fn collect_block_swaps(&self, block_number: u64) -> Result<Vec<String>, QueryError> {
        let swaps = self
            .driver
            .run::<SwapTransaction, _, _>(
                FilterSet::for_block(block_number),
                self.executor.as_ref(),
                &IdDescending,
                OrderedCollect::new(|tx: &SwapTransaction| tx.swap_ids()),
            )
            .await?;

        log::info!("🔁 {} swaps in block {}", swaps.len(), block_number);
        Ok(swaps)
    }

    async fn collect_block_assets(&self, block_number: u64) -> Result<Vec<String>, QueryError> {
        let assets = self
            .driver
            .run::<AssetTransaction, _, _>(
                FilterSet::for_block(block_number),
                self.executor.as_ref(),
                &IdDescending,
                DedupSet::new(|tx: &AssetTransaction| tx.token_ids()),
            )
            .await?;

        log::info!("🪙 {} swapped assets in block {}", assets.len(), block_number);
        Ok(assets)
    }

    async fn with_deadline<T, F>(&self, query: F) -> Result<T, QueryError>
    where
        F: Future<Output = Result<T, QueryError>>,
    {
        match tokio::time::timeout(self.deadline, query).await {
            Ok(result) => result,
            Err(_) => Err(QueryError::Cancelled(self.deadline)),
        }
    }
}
