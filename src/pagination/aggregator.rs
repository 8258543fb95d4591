//! Fold policies applied page by page

use serde::Serialize;
use std::collections::HashSet;

pub trait Aggregator<R> {
    type Output;

    /// Incorporate one page, in page order
    fn fold(&mut self, records: &[R]);

    fn finalize(self) -> Self::Output;
}

/// Result of a `Sum` aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalVolume {
    #[serde(rename = "TotalVolumeUSD")]
    pub total_volume_usd: f64,
}

/// Running f64 total of one numeric field
///
/// Values are added in page-arrival order without compensation, so the total depends on
/// the upstream's ordering.
pub struct Sum<F> {
    total: f64,
    field: F,
}

impl<F> Sum<F> {
    pub fn new(field: F) -> Self {
        Self { total: 0.0, field }
    }
}

impl<R, F> Aggregator<R> for Sum<F>
where
    F: Fn(&R) -> f64,
{
    type Output = TotalVolume;

    fn fold(&mut self, records: &[R]) {
        for record in records {
            self.total += (self.field)(record);
        }
    }

    fn finalize(self) -> TotalVolume {
        TotalVolume {
            total_volume_usd: self.total,
        }
    }
}

/// Append-only sequence, flattening one level per record
///
/// Output order is exactly the upstream order: page by page, then within the page.
pub struct OrderedCollect<T, F> {
    items: Vec<T>,
    extract: F,
}

impl<T, F> OrderedCollect<T, F> {
    pub fn new(extract: F) -> Self {
        Self {
            items: Vec::new(),
            extract,
        }
    }
}

impl<R, T, F> Aggregator<R> for OrderedCollect<T, F>
where
    F: Fn(&R) -> Vec<T>,
{
    type Output = Vec<T>;

    fn fold(&mut self, records: &[R]) {
        for record in records {
            self.items.extend((self.extract)(record));
        }
    }

    fn finalize(self) -> Vec<T> {
        self.items
    }
}

/// Membership set of identifiers
///
/// `finalize` returns members in no particular order.
pub struct DedupSet<F> {
    members: HashSet<String>,
    extract: F,
}

impl<F> DedupSet<F> {
    pub fn new(extract: F) -> Self {
        Self {
            members: HashSet::new(),
            extract,
        }
    }
}

impl<R, F> Aggregator<R> for DedupSet<F>
where
    F: Fn(&R) -> Vec<String>,
{
    type Output = Vec<String>;

    fn fold(&mut self, records: &[R]) {
        for record in records {
            self.members.extend((self.extract)(record));
        }
    }

    fn finalize(self) -> Vec<String> {
        self.members.into_iter().collect()
    }
}
