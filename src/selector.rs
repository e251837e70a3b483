//! Selection of the access URL to harvest from a record.

use crate::format_matcher::FormatMatcher;
use crate::record::{CatalogRecord, Distribution};

/// Find the first distribution whose format fully matches `matcher`.
///
/// Distributions are examined in source order; later matches are ignored.
#[must_use]
pub fn find_distribution<'r, R>(
    record: &'r R,
    matcher: &FormatMatcher,
) -> Option<&'r Distribution>
where
    R: CatalogRecord + ?Sized,
{
    record
        .distributions()
        .iter()
        .find(|d| matcher.matches(&d.format))
}

/// Select the access URL to harvest from `record`.
///
/// Returns the access URL of the first matching distribution, or an empty
/// string when none matches.
///
/// # Examples
///
/// ```
/// use dcat_harvest::{select_access_url, DcatRecord, Distribution, FormatMatcher};
///
/// let record = DcatRecord::new()
///     .add_distribution(Distribution::new("CSV", "a"))
///     .add_distribution(Distribution::new("JSON", "b"));
///
/// assert_eq!(select_access_url(&record, &FormatMatcher::compile("json")), "b");
/// assert_eq!(select_access_url(&record, &FormatMatcher::compile("xml")), "");
/// ```
#[must_use]
pub fn select_access_url<R>(record: &R, matcher: &FormatMatcher) -> String
where
    R: CatalogRecord + ?Sized,
{
    find_distribution(record, matcher)
        .map(|d| d.access_url.clone())
        .unwrap_or_default()
}
