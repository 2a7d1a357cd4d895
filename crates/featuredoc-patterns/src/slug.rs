//! Name normalization for stable scenario identifiers.

/// Turns a human-readable name into a normalized identifier.
///
/// The assembler only relies on the mapping being deterministic; callers can
/// plug in their own scheme to match an existing documentation site.
pub trait NameNormalizer: Send + Sync {
    /// Normalize `name` into a slug.
    fn normalize(&self, name: &str) -> String;
}

/// Default [`NameNormalizer`] backed by [`to_slug`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slugger;

impl NameNormalizer for Slugger {
    fn normalize(&self, name: &str) -> String {
        to_slug(name)
    }
}

/// Lowercase `name`, drop punctuation and join the remaining words with `-`.
///
/// Alphanumeric characters are kept, including non-ASCII letters. Runs of
/// whitespace and hyphens collapse into a single hyphen, and the result never
/// starts or ends with one.
///
/// # Examples
///
/// ```
/// use featuredoc_patterns::to_slug;
///
/// assert_eq!(to_slug("Check FSA values For G8 Crop"), "check-fsa-values-for-g8-crop");
/// assert_eq!(to_slug("  Round IPAReduced -- to $Whole Dollar! "), "round-ipareduced-to-whole-dollar");
/// ```
#[must_use]
pub fn to_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        } else if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        }
    }
    slug
}
