use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::{
    document::{Document, Query},
    model::UNKNOWN,
};

// Unicode decimal digits are kept, not just ASCII ones.
static NON_DIGIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

const POSTING_INFO: Query<'static> = Query::tag("div").with_class("postinginfos");

pub(crate) fn posting_id(doc: &Document) -> String {
    let mut id = UNKNOWN.to_string();
    let Some(info) = doc.find(POSTING_INFO) else {
        return id;
    };
    for entry in info.find_all(Query::tag("p")) {
        let text = entry.text();
        if text.contains("post id") {
            id = NON_DIGIT_REGEX.replace_all(&text, "").into_owned();
        }
    }
    id
}

pub(crate) fn date_posted(doc: &Document) -> String {
    let mut date = UNKNOWN.to_string();
    let Some(info) = doc.find(POSTING_INFO) else {
        return date;
    };
    for entry in info.find_all(Query::tag("p")) {
        if entry.text().contains("posted") {
            date = entry
                .find(Query::tag("time"))
                .map(|time| time.text())
                .unwrap_or_default();
        }
    }
    date
}

pub(crate) fn title(doc: &Document) -> String {
    doc.find(Query::tag("span").with_class("postingtitletext"))
        .map(|span| span.text().trim().to_string())
        .unwrap_or_default()
}

/// Plain text and indented HTML of the posting body, both empty when the
/// body section is missing.
pub(crate) fn description(doc: &Document) -> (String, String) {
    match doc.find(Query::tag("section").with_id("postingbody")) {
        Some(body) => (body.text().trim().to_string(), body.prettify()),
        None => (String::new(), String::new()),
    }
}
