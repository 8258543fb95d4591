/// One bounded batch of records from a single upstream round trip
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    records: Vec<R>,
    page_size: usize,
}

impl<R> Page<R> {
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        Self { records, page_size }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A full page means another page may follow
    pub fn is_full(&self) -> bool {
        self.records.len() == self.page_size
    }

    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }
}
