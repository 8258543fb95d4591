//! Pagination driver and the upstream executor seam

use super::aggregator::Aggregator;
use super::cursor::CursorStrategy;
use super::filter::FilterSet;
use super::page::Page;
use crate::error::{QueryError, UpstreamError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroUsize;

/// Records requested per upstream round trip, shared by every operation
pub const PAGE_SIZE: usize = 100;

/// How one upstream collection is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpec {
    /// Top-level query field, e.g. `transactions`
    pub collection: &'static str,
    /// GraphQL input type accepted by the collection's `where` argument
    pub filter_type: &'static str,
    /// Selection set rendered inside the collection field
    pub selection: &'static str,
}

/// A record type that can be fetched page by page
pub trait PagedRecord: DeserializeOwned + Send {
    const ENTITY: EntitySpec;
}

/// Everything the executor needs to fetch one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub entity: EntitySpec,
    pub first: usize,
    /// Sort field, always descending
    pub order_by: &'static str,
    pub filters: FilterSet,
}

/// One network round trip against the upstream source
///
/// Implementations must be stateless from the caller's point of view; a single
/// instance is shared by every request.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Raw records of the requested collection, in upstream order
    async fn execute(&self, query: &PageQuery) -> Result<Vec<Value>, UpstreamError>;
}

/// Runs cursor pagination to exhaustion for one aggregation
#[derive(Debug, Clone, Copy)]
pub struct PaginationDriver {
    page_size: usize,
}

impl PaginationDriver {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size: page_size.get(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch pages until one comes back short, folding each into `aggregator`
    ///
    /// The first error aborts the run; nothing folded so far is returned.
    pub async fn run<R, C, A>(
        &self,
        filters: FilterSet,
        executor: &dyn QueryExecutor,
        cursor: &C,
        mut aggregator: A,
    ) -> Result<A::Output, QueryError>
    where
        R: PagedRecord,
        C: CursorStrategy<R>,
        A: Aggregator<R>,
    {
        let mut query = PageQuery {
            entity: R::ENTITY,
            first: self.page_size,
            order_by: cursor.order_by(),
            filters,
        };
        let mut fetches = 0usize;
        let mut folded = 0usize;

        loop {
            let raw = executor.execute(&query).await?;
            fetches += 1;

            let page = self.decode_page::<R>(raw)?;
            log::debug!(
                "📄 {} page {}: {} records",
                query.entity.collection,
                fetches,
                page.len()
            );

            aggregator.fold(page.records());
            folded += page.len();

            if !page.is_full() {
                break;
            }
            match page.last() {
                Some(last) => query.filters.apply_cursor(cursor.advance(last)),
                None => break,
            }
        }

        log::debug!(
            "✅ {} exhausted: {} records in {} fetches",
            query.entity.collection,
            folded,
            fetches
        );

        Ok(aggregator.finalize())
    }

    fn decode_page<R: PagedRecord>(&self, raw: Vec<Value>) -> Result<Page<R>, UpstreamError> {
        if raw.len() > self.page_size {
            return Err(UpstreamError::OversizePage {
                page_size: self.page_size,
                received: raw.len(),
            });
        }

        let records = raw
            .into_iter()
            .map(serde_json::from_value::<R>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(records, self.page_size))
    }
}

impl Default for PaginationDriver {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE }
    }
}
