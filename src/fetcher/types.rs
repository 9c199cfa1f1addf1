use bytes::Bytes;
use encoding_rs::Encoding;
use reqwest::{StatusCode, header::HeaderMap};
use url::Url;

/// A fetched page. Non-2xx responses are still returned here; the caller
/// decides what a bad status means for its own unit of work.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: &'static Encoding,
}

impl PageResponse {
    /// True only for `200 OK`; other 2xx codes are not treated as a usable page.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}
