use crate::extractor::{Document, Query};

/// Relative link of every listing row on a search-result page, in page
/// order. A row without an anchor `href` yields `None` so it still counts
/// against the per-page cutoff.
pub fn row_links(html: &str) -> Vec<Option<String>> {
    let doc = Document::parse(html);
    let links = doc
        .find_all(Query::tag("p").with_class("row"))
        .into_iter()
        .map(|row| {
            row.find(Query::tag("a"))
                .and_then(|anchor| anchor.attr("href"))
                .map(str::to_string)
        })
        .collect();
    links
}
