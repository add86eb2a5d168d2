//! Page arithmetic for the question listing.

use crate::validation::ValidationError;

/// Questions per page when nothing else is configured.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest configurable page size. Keeps `offset` within `i64` for any page.
pub const MAX_PER_PAGE: u32 = 1000;

/// Configured page size, shared through router state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// Page size is clamped to `1..=MAX_PER_PAGE`.
    pub fn new(per_page: u32) -> Self {
        Self(per_page.clamp(1, MAX_PER_PAGE))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PER_PAGE)
    }
}

/// A 1-based page over the id-ordered question list.
///
/// Page `p` covers items `[per_page * (p - 1), per_page * p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: PageSize,
}

impl Page {
    pub fn new(number: i64, size: PageSize) -> Result<Self, ValidationError> {
        let number = u32::try_from(number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(ValidationError::NotPositive {
                field: "page",
                value: number,
            })?;
        Ok(Self { number, size })
    }

    pub fn first(size: PageSize) -> Self {
        Self { number: 1, size }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.number) - 1) * self.limit()
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        let size = PageSize::default();
        assert_eq!(Page::new(1, size).unwrap().offset(), 0);
        assert_eq!(Page::new(2, size).unwrap().offset(), 10);
        assert_eq!(Page::new(3, PageSize::new(25)).unwrap().offset(), 50);
    }

    #[test]
    fn rejects_non_positive_pages() {
        let size = PageSize::default();
        assert_eq!(
            Page::new(0, size),
            Err(ValidationError::NotPositive {
                field: "page",
                value: 0
            })
        );
        assert!(Page::new(-3, size).is_err());
        assert!(Page::new(i64::MAX, size).is_err());
    }

    #[test]
    fn clamps_page_size() {
        assert_eq!(PageSize::new(0).get(), 1);
        assert_eq!(Page::first(PageSize::new(0)).limit(), 1);
        assert_eq!(PageSize::new(u32::MAX).get(), MAX_PER_PAGE);
    }

    #[test]
    fn last_page_offset_fits() {
        let page = Page::new(i64::from(u32::MAX), PageSize::new(u32::MAX)).unwrap();
        assert_eq!(
            page.offset(),
            (i64::from(u32::MAX) - 1) * i64::from(MAX_PER_PAGE)
        );
    }
}
