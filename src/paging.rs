use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub total_page: i64,
    pub current_page: i64,
    pub size: i64,
}

impl Paging {
    /// `size` must already be validated as >= 1.
    pub fn new(total: i64, page: i64, size: i64) -> Self {
        Self {
            total_page: (total + size - 1) / size,
            current_page: page,
            size,
        }
    }
}

/// Rows to skip before the first row of `page` (1-based). `None` when the offset
/// does not fit in an `i64`.
pub fn offset(page: i64, size: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(size)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pageable<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}
