//! Semantic cache key construction.
//!
//! Every cached read path owns a key shape; building them in one place
//! keeps population and invalidation in agreement.

/// Key for a resolved long URL: `long_link:{code}`.
pub fn long_link_key(short_link: &str) -> String {
    format!("long_link:{}", short_link)
}

/// Key for a link's statistics document: `stats:{code}`.
pub fn stats_key(short_link: &str) -> String {
    format!("stats:{}", short_link)
}

/// Key for a reverse lookup result: `search:{long_link}`.
pub fn search_key(long_link: &str) -> String {
    format!("search:{}", long_link)
}

/// Key for the expired-links listing.
pub fn expired_links_key() -> String {
    "expired_links".to_string()
}
