//! Paginated Query Aggregation Engine
//!
//! Walks an upstream collection that is returned in a stable descending order and folds
//! every page into a single result.
//!
//! ## Paging contract
//!
//! 1. Fetch `page_size` records for the current `FilterSet`
//! 2. Fold the page into the aggregator
//! 3. Page full → tighten the cursor bound from the last record and repeat
//! 4. Page short (including empty) → finalize
//!
//! Cursor bounds are exclusive (`date_lt`, `id_lt`), so a boundary record is never fetched
//! twice. Errors abort the run and the partial accumulator is dropped.
//!
//! ## Module Organization
//!
//! - `filter` - Structured filter value sent to the upstream (`FilterSet`, `TimeRange`)
//! - `page` - A fetched page and its "full" flag
//! - `cursor` - Cursor strategies (`TimeDescending`, `IdDescending`)
//! - `aggregator` - Fold policies (`Sum`, `OrderedCollect`, `DedupSet`)
//! - `driver` - `PaginationDriver` and the `QueryExecutor` seam

pub mod aggregator;
pub mod cursor;
pub mod driver;
pub mod filter;
pub mod page;

pub use aggregator::{Aggregator, DedupSet, OrderedCollect, Sum, TotalVolume};
pub use cursor::{CursorStrategy, Dated, IdDescending, Identified, TimeDescending};
pub use driver::{EntitySpec, PageQuery, PagedRecord, PaginationDriver, QueryExecutor, PAGE_SIZE};
pub use filter::{CursorFilter, FilterSet, TimeRange};
pub use page::Page;
