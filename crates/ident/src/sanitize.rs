// ABOUTME: Shared slug sanitization: length clamp and reserved-character substitution.
// ABOUTME: Maps URL-reserved characters to hyphenated mnemonic tokens instead of percent-encoding.

/// Maximum length of a derived slug, in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Characters that are unsafe unescaped in a URL path segment, paired with
/// the mnemonic token that replaces them. The mapping is reversible: every
/// character gets a distinct token.
const RESERVED_SUBSTITUTIONS: &[(char, &str)] = &[
    (';', "-semicolon"),
    ('/', "-slash"),
    ('?', "-question"),
    (':', "-colon"),
    ('@', "-at"),
    ('&', "-amp"),
    ('=', "-equals"),
    ('+', "-plus"),
    ('$', "-dollar"),
    (',', "-comma"),
];

/// Clamps a slug candidate to `MAX_SLUG_LEN` characters, then replaces any
/// reserved characters that remain with their mnemonic tokens and re-clamps.
pub fn sanitize_slug(candidate: &str) -> String {
    let clamped = clamp(candidate);
    if !clamped.chars().any(is_reserved) {
        return clamped;
    }

    let mut substituted = String::with_capacity(clamped.len());
    for c in clamped.chars() {
        match RESERVED_SUBSTITUTIONS.iter().find(|(r, _)| *r == c) {
            Some((_, token)) => substituted.push_str(token),
            None => substituted.push(c),
        }
    }
    clamp(&substituted)
}

fn is_reserved(c: char) -> bool {
    RESERVED_SUBSTITUTIONS.iter().any(|(r, _)| *r == c)
}

fn clamp(s: &str) -> String {
    s.chars().take(MAX_SLUG_LEN).collect()
}
