//! Page slicing.

use asrs_dashboard_analytics_models::{Page, Pagination};

use crate::AnalyticsError;

/// Returns page `page` (1-indexed) of `items` with `limit` items per page.
///
/// Pages past the end are empty rather than an error.
///
/// # Errors
///
/// * If `page` or `limit` is zero
pub fn paginate<T: Clone>(items: &[T], page: u32, limit: u32) -> Result<Page<T>, AnalyticsError> {
    if page == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "page",
            message: "must be at least 1".to_string(),
        });
    }
    if limit == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "limit",
            message: "must be at least 1".to_string(),
        });
    }

    let total = items.len() as u64;
    let offset = u64::from(page - 1) * u64::from(limit);
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(items.len());
    let end = start.saturating_add(limit as usize).min(items.len());

    Ok(Page {
        items: items[start..end].to_vec(),
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        },
    })
}
