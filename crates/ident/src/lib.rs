// ABOUTME: Identifier and timestamp normalization core for the runnel aggregator.
// ABOUTME: Derives feed/post slugs from URLs and repairs malformed feed publish dates.

pub mod error;
pub mod feed_slug;
pub mod post_slug;
pub mod sanitize;
pub mod time_parse;

pub use error::TimeParseError;
pub use feed_slug::derive_feed_slug;
pub use post_slug::derive_post_slug;
pub use sanitize::{sanitize_slug, MAX_SLUG_LEN};
pub use time_parse::parse_lenient_time;

// ----------------------------------------------------------------------------
// URL utilities
// ----------------------------------------------------------------------------

use url::Url;

/// Extracts the base domain (scheme + host + optional port) from a URL.
pub fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let mut base = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        base.push_str(&format!(":{port}"));
    }
    Some(base)
}

/// Resolves a possibly-relative item link against its feed's URL.
/// Absolute links pass through unchanged; relative links need a base.
/// Callers should absolutize a link with this before deriving its slug.
pub fn resolve_item_url(link: &str, base_url: Option<&str>) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    if link.starts_with("http://") || link.starts_with("https://") {
        return Some(link.to_string());
    }

    let base = base_url?;
    let base_parsed = Url::parse(base).ok()?;
    let resolved = base_parsed.join(link).ok()?;
    Some(resolved.to_string())
}
