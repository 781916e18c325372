use crate::domain::entities::dataset::PageRequest;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [10, 25, 50, 100];

/// Zero-based page window. Page count is never stored; it is derived from the
/// record count the server reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page_index: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            start_index: self.page_index * self.page_size,
            num_records: self.page_size,
        }
    }

    pub fn page_count(&self, number_of_records: u64) -> u64 {
        number_of_records.div_ceil(self.page_size)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, number_of_records: u64) -> bool {
        self.page_index * self.page_size + self.page_size < number_of_records
    }

    pub fn first(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self
        }
    }

    pub fn next(self, number_of_records: u64) -> Self {
        if !self.can_next(number_of_records) {
            return self;
        }
        Self {
            page_index: self.page_index + 1,
            ..self
        }
    }

    pub fn last(self, number_of_records: u64) -> Self {
        Self {
            page_index: self.page_count(number_of_records).saturating_sub(1),
            ..self
        }
    }

    /// Changing the page size restarts at the first page.
    pub fn resize(self, page_size: u64) -> Self {
        Self::with_page_size(page_size)
    }
}
