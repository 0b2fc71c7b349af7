// ABOUTME: Post-level slug derivation from a post's link URL.
// ABOUTME: Walks path segments backward through query/fragment debris to find the readable id.

use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use once_cell::sync::Lazy;

use crate::sanitize::sanitize_slug;

/// Generic terms that disqualify a candidate when they dominate it.
const COMMON_WORDS: &[&str] = &[
    "about", "archive", "article", "atom", "blog", "comment", "contact", "cookie", "default",
    "feed", "index", "like", "link", "news", "note", "post", "privacy", "replies", "rss",
    "sitemap", "terms",
];

/// File extensions stripped from the end of a candidate (at most one).
const KNOWN_EXTENSIONS: &[&str] = &[
    ".aspx", ".axd", ".email", ".fyi", ".htm", ".html", ".js", ".md", ".mdx", ".page", ".pdf",
    ".php", ".py", ".rss", ".txt", ".webm", ".xml", ".yml",
];

/// Punctuation trimmed from candidate boundaries.
const BOUNDARY_PUNCTUATION: &[char] =
    &['!', '(', ')', '+', '-', '@', '[', ']', '_', '{', '}', '~'];

static COMMON_WORD_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .start_kind(StartKind::Anchored)
        .build(COMMON_WORDS)
        .unwrap()
});

/// Derives a slug for a post from its link URL.
///
/// Path segments are examined from the last to the first. Each segment is
/// cleaned of query-string and fragment debris, stripped of one recognized
/// file extension, and trimmed of boundary punctuation; segments that end
/// up empty or dominated by a generic word ("feed", "index", ...) are
/// skipped. The surviving candidate is sanitized and returned.
///
/// Never fails: when every segment is exhausted, the (possibly empty) last
/// examined value is sanitized and returned.
pub fn derive_post_slug(url: &str) -> String {
    let mut rest = url.trim_end_matches('/');
    let mut examined = "";

    loop {
        let (parent, segment) = match rest.rfind('/') {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => ("", rest),
        };

        match extract_candidate(segment) {
            Some(candidate) => {
                examined = candidate;
                if keep_candidate(candidate) {
                    return sanitize_slug(candidate);
                }
            }
            None => examined = "",
        }

        rest = parent.trim_end_matches('/');
        if rest.is_empty() {
            break;
        }
    }

    sanitize_slug(examined)
}

/// Cleans one path segment into a slug candidate.
///
/// Returns `None` when the segment must be discarded outright: a `utm_*`
/// query parameter, a malformed query leftover, or a path-like fragment at
/// position zero.
fn extract_candidate(segment: &str) -> Option<&str> {
    let mut candidate = segment;

    if let Some(stripped) = candidate.strip_prefix('?') {
        // A pure query string after the real path ended at a trailing '/'.
        // The first parameter value may serve as the id ("?p=474" -> "474"),
        // but tracking parameters disqualify the whole segment.
        candidate = stripped;
        if let Some(eq) = candidate.find('=') {
            let key = &candidate[..eq];
            if key.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("utm_")) {
                return None;
            }
            candidate = &candidate[eq + 1..];
            if let Some(amp) = candidate.find('&') {
                candidate = &candidate[..amp];
            }
        }
    } else if let Some(q) = candidate.find('?') {
        // Path and query glued together: keep the path part, unless a '='
        // survives in it (malformed query leftover).
        candidate = &candidate[..q];
        if candidate.contains('=') {
            return None;
        }
    }

    if let Some(hash) = candidate.find('#') {
        let prefix = &candidate[..hash];
        let fragment = &candidate[hash + 1..];
        // A fragment with a colon, or one much shorter than what precedes
        // it, is a trailing anchor rather than the content id.
        if fragment.contains(':') || prefix.len() > fragment.len() {
            if hash == 0 {
                return None;
            }
            candidate = prefix;
        } else {
            candidate = fragment;
        }
    }

    candidate = strip_known_extension(candidate);
    Some(candidate.trim_matches(BOUNDARY_PUNCTUATION))
}

fn strip_known_extension(candidate: &str) -> &str {
    let lower = candidate.to_ascii_lowercase();
    let mut stripped = 0;
    for ext in KNOWN_EXTENSIONS {
        if lower.ends_with(ext) && ext.len() > stripped {
            stripped = ext.len();
        }
    }
    &candidate[..candidate.len() - stripped]
}

/// A candidate survives unless it is empty or a generic word dominates it.
/// "feed" falls, but "atomic-habits" stands: the candidate must be at least
/// three times the matched word's length to survive a prefix match.
fn keep_candidate(candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }
    match COMMON_WORD_MATCHER.find(Input::new(candidate).anchored(Anchored::Yes)) {
        Some(m) => candidate.len() >= 3 * m.end(),
        None => true,
    }
}
