use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fs;
use url::Url;

use crate::extractor::{UNKNOWN, extract, extract_response};
use crate::fetcher::PageResponse;

const LISTING_URL: &str = "http://denver.craigslist.org/web/5012345678.html";

#[test]
fn test_extract_full_listing() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/listing.html")
        .expect("Failed to read test fixture");

    let record = extract(LISTING_URL, &html);

    assert_eq!(record.url, LISTING_URL);
    assert_eq!(record.id, "5012345678");
    assert_eq!(record.date_posted, "2015-04-02 10:21am");
    assert_eq!(record.title, "Python / AWS Engineer (Lower Downtown)");
    assert!(record.description_text.starts_with("We are looking for a contractor"));
    assert!(record.description_text.contains("python"));
    assert!(record.description_text.ends_with("Send a resume & portfolio."));
    assert!(record.description_html.starts_with("<section id=\"postingbody\">\n"));
    assert!(record.description_html.contains("\n <b>\n  python\n </b>\n"));
    assert!(record.description_html.contains("resume &amp; portfolio"));
    assert!(record.description_html.ends_with("</section>\n"));
}

#[test]
fn test_missing_body_defaults_description_only() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/no_body.html")
        .expect("Failed to read test fixture");

    let record = extract(LISTING_URL, &html);

    assert_eq!(record.description_text, "");
    assert_eq!(record.description_html, "");
    assert_eq!(record.title, "Web Developer Needed");
    assert_eq!(record.id, "4999");
    assert_eq!(record.date_posted, "2015-03-30 4:15pm");
}

#[test]
fn test_missing_metadata_uses_unknown() {
    let html = r#"<html><body>
        <span class="postingtitletext">Database admin</span>
        <section id="postingbody">mysql tuning</section>
    </body></html>"#;

    let record = extract(LISTING_URL, html);

    assert_eq!(record.id, UNKNOWN);
    assert_eq!(record.date_posted, UNKNOWN);
    assert_eq!(record.title, "Database admin");
    assert_eq!(record.description_text, "mysql tuning");
}

#[test]
fn test_posted_entry_without_time_is_empty() {
    let html = r#"<html><body><div class="postinginfos">
        <p>post id: 77</p>
        <p>posted: sometime last week</p>
    </div></body></html>"#;

    let record = extract(LISTING_URL, html);

    assert_eq!(record.id, "77");
    assert_eq!(record.date_posted, "");
}

#[test]
fn test_last_matching_info_entry_wins() {
    let html = r#"<html><body><div class="postinginfos">
        <p>post id: 1</p>
        <p>repost id: 2</p>
    </div></body></html>"#;

    let record = extract(LISTING_URL, html);
    assert_eq!(record.id, "2");
}

#[test]
fn test_post_id_keeps_only_decimal_digits() {
    let html = r#"<html><body><div class="postinginfos">
        <p>post id: ٤٢-7½ Ⅻ</p>
    </div></body></html>"#;

    let record = extract(LISTING_URL, html);
    assert_eq!(record.id, "٤٢7");
}

#[test]
fn test_missing_title_is_empty() {
    let html = r#"<html><body><h2 class="postingtitle">no span here</h2></body></html>"#;

    let record = extract(LISTING_URL, html);

    assert_eq!(record.title, "");
    assert_eq!(record.id, UNKNOWN);
    assert_eq!(record.description_text, "");
}

#[test]
fn test_malformed_html() {
    let html = "<html><body><span class=\"postingtitletext\">Broken<section id=\"postingbody\">Unclosed tags<div>More";

    let record = extract(LISTING_URL, html);

    assert!(record.title.starts_with("Broken"));
    assert!(record.description_text.contains("Unclosed tags"));
}

#[test]
fn test_extract_response_keeps_requested_url() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/listing.html")
        .expect("Failed to read test fixture");

    let response = create_test_response(html, "http://denver.craigslist.org/redirected.html");
    let record = extract_response(LISTING_URL, &response);

    assert_eq!(record.url, LISTING_URL);
    assert_eq!(record.id, "5012345678");
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        headers: HeaderMap::new(),
        body_raw: Bytes::from(html.clone()),
        body_utf8: html,
        charset: encoding_rs::UTF_8,
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract(LISTING_URL, &html);
        }

        #[test]
        fn test_missing_fields_default(text in "[a-z ]{0,40}") {
            let html = format!("<html><body><p>{}</p></body></html>", text);
            let record = extract(LISTING_URL, &html);
            prop_assert_eq!(record.id, UNKNOWN);
            prop_assert_eq!(record.title, "");
            prop_assert_eq!(record.description_html, "");
        }
    }
}
