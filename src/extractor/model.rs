/// Placeholder for metadata the page did not carry.
pub const UNKNOWN: &str = "unknown";

/// Everything the crawler keeps from one listing page. Built once by
/// [`crate::extractor::extract`] and dropped after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub url: String,
    /// Digits of the posting id, or [`UNKNOWN`].
    pub id: String,
    /// Timestamp label, [`UNKNOWN`] when not present, empty when the
    /// "posted" entry has no time element.
    pub date_posted: String,
    pub title: String,
    pub description_text: String,
    pub description_html: String,
}
