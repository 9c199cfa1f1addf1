use crate::fetcher::types::PageResponse;
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

const SNIFF_LEN: usize = 4096;

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
) -> PageResponse {
    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html");

    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_lossy(&body_bytes, charset);

    PageResponse {
        url_final,
        status,
        headers,
        body_raw: body_bytes,
        body_utf8,
        charset,
    }
}

fn label_to_encoding(captures: Option<regex::Captures<'_>>) -> Option<&'static Encoding> {
    let label = captures?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

pub(crate) fn detect_charset(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_to_encoding(CHARSET_REGEX.captures(content_type)) {
        return encoding;
    }

    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_LEN)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(encoding) = label_to_encoding(META_CHARSET_REGEX.captures(&search_str)) {
        return encoding;
    }
    if let Some(encoding) = label_to_encoding(META_HTTP_EQUIV_REGEX.captures(&search_str)) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

/// Malformed sequences become U+FFFD; decoding never fails a fetch.
fn decode_lossy(body_bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        tracing::debug!("replaced malformed {} sequences in body", encoding.name());
    }
    decoded.into_owned()
}
