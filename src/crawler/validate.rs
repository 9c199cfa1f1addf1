use regex::Regex;
use std::sync::LazyLock;

static LISTING_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        // domain
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
        r"localhost|",
        // dotted-quad ip
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        // port
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .unwrap()
});

/// Syntax check for a listing link before it is fetched.
pub fn is_valid_listing_url(url: &str) -> bool {
    LISTING_URL_REGEX.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_site_urls() {
        assert!(is_valid_listing_url("http://denver.craigslist.org/search/cpg"));
        assert!(is_valid_listing_url("https://boulder.craigslist.org/web/5012345678.html"));
        assert!(is_valid_listing_url("HTTP://Denver.Craigslist.ORG/"));
        assert!(is_valid_listing_url("ftps://files.example.com"));
    }

    #[test]
    fn test_accepts_localhost_and_ip_with_port() {
        assert!(is_valid_listing_url("http://localhost:8080/web/1.html"));
        assert!(is_valid_listing_url("http://127.0.0.1:53211/web/1.html?lang=en"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_listing_url("not-a-url"));
        assert!(!is_valid_listing_url("ftp://"));
        assert!(!is_valid_listing_url("http://den ver.craigslist.org/web/1.html"));
        assert!(!is_valid_listing_url("http://denver.craigslist.org/web/1 2.html"));
        assert!(!is_valid_listing_url("mailto:someone@example.com"));
        assert!(!is_valid_listing_url(""));
    }

    #[test]
    fn test_rejects_concatenated_absolute_link() {
        // site root + an already-absolute href
        assert!(!is_valid_listing_url(
            "http://denver.craigslist.orghttp://boulder.craigslist.org/web/1.html"
        ));
    }
}
