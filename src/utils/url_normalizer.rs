//! Redirect target presentation.

/// Ensures a URL carries a scheme a browser can follow.
///
/// Stored long links are kept verbatim; this is applied only when building
/// the redirect target. URLs without a recognized `http://` or `https://`
/// prefix get a default `http://` prepended.
///
/// # Examples
///
/// ```
/// use linkcut::utils::url_normalizer::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.org/path"), "http://example.org/path");
/// assert_eq!(ensure_scheme("https://example.org"), "https://example.org");
/// ```
pub fn ensure_scheme(long_link: &str) -> String {
    if long_link.starts_with("http://") || long_link.starts_with("https://") {
        long_link.to_string()
    } else {
        format!("http://{}", long_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_http_prefix() {
        assert_eq!(ensure_scheme("example.org/path"), "http://example.org/path");
    }

    #[test]
    fn test_http_url_is_unchanged() {
        assert_eq!(ensure_scheme("http://example.org"), "http://example.org");
    }

    #[test]
    fn test_https_url_is_unchanged() {
        assert_eq!(
            ensure_scheme("https://example.org/a?b=c"),
            "https://example.org/a?b=c"
        );
    }

    #[test]
    fn test_other_schemes_are_treated_as_bare() {
        // Only http/https are recognized; anything else gets the default.
        assert_eq!(ensure_scheme("ftp://example.org"), "http://ftp://example.org");
    }
}
