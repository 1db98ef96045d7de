//! Pagination primitives shared by backend list endpoints.
//!
//! List endpoints receive raw, possibly-missing `page`/`limit`/`sortBy`/
//! `sortOrder` query options. [`PaginationOptions::normalise`] turns them into
//! a canonical [`Pagination`] tuple with defaults applied and the record skip
//! precomputed. Normalisation is a pure function; malformed numeric input is
//! rejected with a typed [`PaginationError`] so an invalid skip never reaches
//! a store query.

use serde::{Deserialize, Serialize};

/// Default page when none is supplied.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when none is supplied.
pub const DEFAULT_LIMIT: u64 = 10;
/// Default sort field when none is supplied.
pub const DEFAULT_SORT_BY: &str = "createdAt";

/// Direction applied to the dynamic sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order (newest first for timestamp fields).
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse the wire form (`"asc"` / `"desc"`).
    pub fn parse(value: &str) -> Result<Self, PaginationError> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(PaginationError::InvalidSortOrder {
                value: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while normalising raw pagination options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// A numeric option did not parse as an unsigned integer.
    #[error("'{value}' is not a valid value for '{field}'")]
    InvalidNumber {
        /// Offending option name (`page` or `limit`).
        field: &'static str,
        /// Raw value as received.
        value: String,
    },
    /// The sort order was neither `asc` nor `desc`.
    #[error("'{value}' is not a valid sort order; expected 'asc' or 'desc'")]
    InvalidSortOrder {
        /// Raw value as received.
        value: String,
    },
}

impl PaginationError {
    /// The query-string field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidNumber { field, .. } => field,
            Self::InvalidSortOrder { .. } => "sortOrder",
        }
    }
}

/// Raw pagination options as received from a query string.
///
/// All fields are optional; numeric fields stay as strings until
/// normalisation so rejection stays in one place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    /// Requested page number, one-based.
    pub page: Option<String>,
    /// Requested page size.
    pub limit: Option<String>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<String>,
}

impl PaginationOptions {
    /// Normalise raw options into a canonical [`Pagination`] tuple.
    ///
    /// Missing or zero `page`/`limit` fall back to the defaults (`0` is
    /// treated as absent, matching the behaviour list consumers rely on);
    /// non-numeric values are rejected.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page` or `limit` is not an unsigned
    /// integer, when the derived skip overflows `u64`, or when `sortOrder`
    /// is neither `asc` nor `desc`.
    pub fn normalise(&self) -> Result<Pagination, PaginationError> {
        let page = parse_or_default("page", self.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_or_default("limit", self.limit.as_deref(), DEFAULT_LIMIT)?;

        // page is at least 1 here; only the multiplication can overflow.
        let skip = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| PaginationError::InvalidNumber {
                field: "page",
                value: page.to_string(),
            })?;

        let sort_by = self
            .sort_by
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SORT_BY.to_owned());
        let sort_order = match self.sort_order.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => SortOrder::parse(raw)?,
            None => SortOrder::default(),
        };

        Ok(Pagination {
            page,
            limit,
            skip,
            sort_by,
            sort_order,
        })
    }
}

fn parse_or_default(
    field: &'static str,
    raw: Option<&str>,
    default: u64,
) -> Result<u64, PaginationError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| PaginationError::InvalidNumber {
                    field,
                    value: value.to_owned(),
                })?;
            if parsed == 0 {
                Ok(default)
            } else {
                Ok(parsed)
            }
        }
    }
}

/// Canonical pagination tuple consumed by repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page number, at least 1.
    pub page: u64,
    /// Page size, at least 1.
    pub limit: u64,
    /// Records to skip: `(page - 1) * limit`.
    pub skip: u64,
    /// Field to sort by.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            skip: 0,
            sort_by: DEFAULT_SORT_BY.to_owned(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Metadata block returned alongside paginated list data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Page that was served.
    pub page: u64,
    /// Page size that was applied.
    pub limit: u64,
    /// Total number of records matching the query, across all pages.
    pub total: u64,
}

impl ListMeta {
    /// Build metadata for a served page.
    #[must_use]
    pub const fn new(pagination: &Pagination, total: u64) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn options(page: Option<&str>, limit: Option<&str>) -> PaginationOptions {
        PaginationOptions {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
            ..PaginationOptions::default()
        }
    }

    #[test]
    fn defaults_apply_when_options_are_empty() {
        let result = PaginationOptions::default().normalise().unwrap();
        assert_eq!(result.page, 1);
        assert_eq!(result.limit, 10);
        assert_eq!(result.skip, 0);
        assert_eq!(result.sort_by, "createdAt");
        assert_eq!(result.sort_order, SortOrder::Desc);
    }

    #[rstest]
    #[case(Some("2"), Some("10"), 2, 10, 10)]
    #[case(Some("2"), None, 2, 10, 10)]
    #[case(Some("3"), Some("25"), 3, 25, 50)]
    #[case(Some("0"), Some("0"), 1, 10, 0)]
    fn skip_is_derived_from_page_and_limit(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
        #[case] expected_skip: u64,
    ) {
        let result = options(page, limit).normalise().unwrap();
        assert_eq!(result.page, expected_page);
        assert_eq!(result.limit, expected_limit);
        assert_eq!(result.skip, expected_skip);
    }

    #[test]
    fn explicit_sort_options_are_honoured() {
        let raw = PaginationOptions {
            page: Some("2".to_owned()),
            limit: Some("10".to_owned()),
            sort_by: Some("year".to_owned()),
            sort_order: Some("asc".to_owned()),
        };
        let result = raw.normalise().unwrap();
        assert_eq!(result.sort_by, "year");
        assert_eq!(result.sort_order, SortOrder::Asc);
    }

    #[test]
    fn skip_at_the_u64_boundary_is_accepted() {
        let huge_page = u64::MAX.to_string();
        let result = options(Some(&huge_page), Some("1")).normalise().unwrap();
        assert_eq!(result.skip, u64::MAX - 1);
    }

    #[rstest]
    #[case(Some("abc"), None, "page")]
    #[case(None, Some("ten"), "limit")]
    #[case(Some("-1"), None, "page")]
    #[case(Some("2.5"), None, "page")]
    #[case(Some("18446744073709551615"), Some("10"), "page")]
    #[case(Some("18446744073709551615"), None, "page")]
    fn unusable_page_or_limit_is_rejected(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] field: &str,
    ) {
        let err = options(page, limit).normalise().unwrap_err();
        assert_eq!(err.field(), field);
    }

    #[test]
    fn unknown_sort_order_is_rejected() {
        let raw = PaginationOptions {
            sort_order: Some("sideways".to_owned()),
            ..PaginationOptions::default()
        };
        let err = raw.normalise().unwrap_err();
        assert_eq!(err.field(), "sortOrder");
    }

    #[test]
    fn list_meta_reports_served_page() {
        let pagination = options(Some("2"), Some("5")).normalise().unwrap();
        let meta = ListMeta::new(&pagination, 42);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.limit, 5);
        assert_eq!(meta.total, 42);
    }
}
