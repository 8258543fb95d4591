//! Cursor strategies
//!
//! A strategy names the ordering field (always descending) and turns the last record of
//! a full page into the exclusive bound for the next one.

use super::filter::CursorFilter;

/// Record ordered by a unix-second timestamp
pub trait Dated {
    fn date(&self) -> u64;
}

/// Record ordered by a lexicographically comparable identifier
pub trait Identified {
    fn id(&self) -> &str;
}

pub trait CursorStrategy<R>: Send + Sync {
    /// Field the upstream sorts by (descending)
    fn order_by(&self) -> &'static str;

    /// Bound for the page after the one ending in `last`
    ///
    /// Pure function of `last`; never widens the window.
    fn advance(&self, last: &R) -> CursorFilter;
}

/// `orderBy: date, orderDirection: desc`, next page via `date_lt`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDescending;

impl<R: Dated> CursorStrategy<R> for TimeDescending {
    fn order_by(&self) -> &'static str {
        "date"
    }

    fn advance(&self, last: &R) -> CursorFilter {
        CursorFilter::DateLt(last.date())
    }
}

/// `orderBy: id, orderDirection: desc`, next page via `id_lt`
#[derive(Debug, Clone, Copy, Default)]
pub struct IdDescending;

impl<R: Identified> CursorStrategy<R> for IdDescending {
    fn order_by(&self) -> &'static str {
        "id"
    }

    fn advance(&self, last: &R) -> CursorFilter {
        CursorFilter::IdLt(last.id().to_string())
    }
}
