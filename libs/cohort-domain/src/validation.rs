//! Naming and period validation
//!
//! Pure validation rules shared by the catalog, membership, and report
//! services. Nothing here touches a store; every check is a plain function
//! over its inputs and the current clock.

use chrono::{Datelike, Utc};

use crate::error::{Result, SegmentationError};
use crate::membership::UserSegment;

/// Check whether a slug matches the allowed naming
///
/// A slug is valid iff it is non-empty and consists only of ASCII uppercase
/// letters, digits, and underscores (the `^[A-Z0-9_]+$` character class).
///
/// # Example
///
/// ```rust
/// use cohort_domain::validation::is_valid_slug;
///
/// assert!(is_valid_slug("AVITO_DISCOUNT_50"));
/// assert!(!is_valid_slug("AVITO-PERFORMANCE-VAS"));
/// assert!(!is_valid_slug(""));
/// ```
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

/// Validate a requested user-segment assignment
///
/// Checks the slug naming first, then the expiration. A missing expiration
/// means "never expires" and always passes. An expiration strictly before
/// the current time fails; an expiration of exactly now or later passes,
/// since real time advances between validation and persistence.
///
/// # Errors
///
/// - `SegmentationError::InvalidSlug` if the slug naming is invalid
/// - `SegmentationError::AlreadyExpired` if the expiration is in the past
pub fn validate_assignment(segment: &UserSegment) -> Result<()> {
    if !is_valid_slug(&segment.slug) {
        return Err(SegmentationError::invalid_slug(&segment.slug));
    }

    match segment.expire_at {
        None => Ok(()),
        Some(expire_at) if expire_at < Utc::now() => {
            Err(SegmentationError::already_expired(&segment.slug))
        }
        Some(_) => Ok(()),
    }
}

/// Check whether a (year, month) pair is a valid report period
///
/// Valid iff `1971 < year < current_year` and `1 <= month <= 12`. The
/// current year is rejected entirely: reports cover closed months of past
/// years only.
pub fn is_valid_report_period(year: i32, month: u32) -> bool {
    year > 1971 && year < Utc::now().year() && (1..=12).contains(&month)
}
