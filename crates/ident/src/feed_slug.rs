// ABOUTME: Feed-level slug derivation from a feed's source URL.
// ABOUTME: Scans path segments backward for a meaningful name, falling back to domain labels.

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use once_cell::sync::Lazy;

/// Path segments starting with these words carry no feed identity.
const GENERIC_PATH_PREFIXES: &[&str] = &[
    "index.",
    "rss",
    "atom",
    "author",
    "blog",
    "feed",
    "post",
    "page",
    "default",
    "syndication",
];

/// File suffixes marking a segment as a feed document rather than a name.
const FEED_FILE_SUFFIXES: &[&str] = &[".xml", ".rss", ".axd"];

/// Multi-tenant publishing hosts where the interesting label sits one level
/// to the left of the matched one (foo.github.io -> foo).
const MULTI_TENANT_HOSTS: &[&str] = &["github", "hashnode"];

static GENERIC_PREFIX_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .start_kind(StartKind::Anchored)
        .build(GENERIC_PATH_PREFIXES)
        .unwrap()
});

/// Derives a short, human-meaningful slug for a feed from its source URL.
///
/// Path segments are scanned from the end toward the start; the first one
/// that is not low-signal (too short, a feed file, or a generic word like
/// "rss" or "blog") wins. When the path holds nothing usable, a label is
/// picked from the host name instead. Never fails: the worst case is the
/// last non-empty segment verbatim, or `""` for an empty URL.
///
/// The result is not run through slug sanitization: it comes from a domain
/// or path component and is assumed already safe.
pub fn derive_feed_slug(url: &str) -> String {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    let Some(last) = segments.last() else {
        return String::new();
    };

    // Index of the segment holding the host: after the scheme token when the
    // URL is absolute ("https:" keeps its trailing colon under '/'-splitting).
    let host_idx = if segments[0].ends_with(':') { 1 } else { 0 };

    for i in (host_idx + 1..segments.len()).rev() {
        if !is_low_signal(segments[i]) {
            return segments[i].to_string();
        }
    }

    // Nothing usable in the path: try a domain label.
    if let Some(host) = segments.get(host_idx) {
        if host.contains('.') {
            if let Some(label) = pick_domain_label(host) {
                return label;
            }
        }
    }

    (*last).to_string()
}

fn is_low_signal(segment: &str) -> bool {
    if segment.len() < 3 {
        return true;
    }
    let lower = segment.to_ascii_lowercase();
    if FEED_FILE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return true;
    }
    GENERIC_PREFIX_MATCHER
        .find(Input::new(segment).anchored(Anchored::Yes))
        .is_some()
}

/// Picks the most specific meaningful label from a dotted host name.
///
/// Labels are walked right to left, skipping the final label and anything
/// TLD-sized (3 characters or fewer). A leading `www` yields to the label
/// after it; a match on a known multi-tenant host yields to the tenant
/// label before it.
fn pick_domain_label(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return None;
    }

    let mut chosen = 0;
    for i in (0..labels.len() - 1).rev() {
        if labels[i].len() > 3 {
            chosen = i;
            break;
        }
    }

    if labels[chosen].eq_ignore_ascii_case("www") && chosen + 1 < labels.len() {
        chosen += 1;
    }
    if MULTI_TENANT_HOSTS.contains(&labels[chosen]) && chosen > 0 {
        chosen -= 1;
    }

    if labels[chosen].is_empty() {
        return None;
    }
    Some(labels[chosen].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_beats_feed_file() {
        assert_eq!(derive_feed_slug("https://blog.antosubash.com/rss.xml"), "antosubash");
    }

    #[test]
    fn test_www_yields_to_next_label() {
        assert_eq!(derive_feed_slug("https://www.jvt.me/feed.xml"), "jvt");
    }

    #[test]
    fn test_meaningful_path_segment_wins() {
        assert_eq!(
            derive_feed_slug("https://example.com/newsletter/feed.xml"),
            "newsletter"
        );
    }

    #[test]
    fn test_generic_prefix_is_case_insensitive() {
        // "BLOGROLL" matches the "blog" prefix regardless of case.
        assert_eq!(
            derive_feed_slug("https://example.com/BLOGROLL/Feed.XML"),
            "example"
        );
    }

    #[test]
    fn test_multi_tenant_github() {
        assert_eq!(derive_feed_slug("https://foo.github.io/atom.xml"), "foo");
    }

    #[test]
    fn test_multi_tenant_hashnode() {
        assert_eq!(derive_feed_slug("https://engineering.hashnode.dev/rss.xml"), "engineering");
    }

    #[test]
    fn test_two_label_host() {
        assert_eq!(derive_feed_slug("https://jvt.me/feed.xml"), "jvt");
    }

    #[test]
    fn test_hostless_fallback_returns_last_segment() {
        assert_eq!(derive_feed_slug("http://localhost/rss"), "rss");
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(derive_feed_slug(""), "");
        assert_eq!(derive_feed_slug("///"), "");
    }

    #[test]
    fn test_bare_segment_is_idempotent() {
        assert_eq!(derive_feed_slug("antosubash"), "antosubash");
        assert_eq!(derive_feed_slug("jvt"), "jvt");
    }
}
