pub mod document;
mod listing;
pub mod model;

#[cfg(test)]
mod tests;

pub use document::{Document, Element, Query};
pub use model::{ListingRecord, UNKNOWN};

use crate::fetcher::PageResponse;

/// Parse a listing page into a fully populated record.
///
/// Each field is looked up on its own; missing markup yields that field's
/// default and never affects the others.
pub fn extract(url: &str, html: &str) -> ListingRecord {
    let doc = Document::parse(html);
    let (description_text, description_html) = listing::description(&doc);

    ListingRecord {
        url: url.to_string(),
        id: listing::posting_id(&doc),
        date_posted: listing::date_posted(&doc),
        title: listing::title(&doc),
        description_text,
        description_html,
    }
}

/// Extract from a fetched page, keeping the URL the crawler asked for rather
/// than the post-redirect one.
pub fn extract_response(url: &str, resp: &PageResponse) -> ListingRecord {
    extract(url, &resp.body_utf8)
}
