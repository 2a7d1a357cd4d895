//! Reference-number matchers for free-floating feature file comments.
//!
//! Teams annotate scenarios with change-log comments such as
//! `#24.01.00 RI:102069-03 (B-12010) - enter specflow`, where `RI:` introduces
//! a theme number and a parenthesised `B-` token names a story. The matchers
//! here extract those numbers so they can be turned into classification tags.
//! Only the first occurrence in a comment is considered.

use std::sync::LazyLock;

use regex::Regex;

static STORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(B[-_](\d+)\)").unwrap_or_else(|_| unreachable!()));

// The first captured character may not be `B` or `(` so that `RI:(B-32045)`
// is not read as a theme.
static THEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RI:\W*([^B(][A-Za-z0-9-]*)").unwrap_or_else(|_| unreachable!())
});

/// Return the digits of the first `(B-<digits>)` or `(B_<digits>)` token.
///
/// # Examples
///
/// ```
/// use featuredoc_patterns::story_reference;
///
/// assert_eq!(story_reference("#RI:102069-03 (B-12010) note"), Some("12010"));
/// assert_eq!(story_reference("B-12010 without parentheses"), None);
/// ```
#[must_use]
pub fn story_reference(text: &str) -> Option<&str> {
    STORY_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Return the normalized theme number following the first `RI:` marker.
///
/// Hyphens in the captured number are replaced with underscores so the value
/// can be used inside a tag. A capture that is blank after trimming, or that
/// starts with `B` or `(` once trimmed, is treated as no match.
///
/// # Examples
///
/// ```
/// use featuredoc_patterns::theme_reference;
///
/// assert_eq!(
///     theme_reference("#24.01.00 RI:102069-03 (B-12010)").as_deref(),
///     Some("102069_03")
/// );
/// assert_eq!(theme_reference("#26.03.00 RI:(B-32045)"), None);
/// ```
#[must_use]
pub fn theme_reference(text: &str) -> Option<String> {
    let captured = THEME_RE.captures(text)?.get(1)?.as_str().trim();
    if captured.is_empty() || captured.starts_with(['B', '(']) {
        return None;
    }
    Some(captured.replace('-', "_"))
}
