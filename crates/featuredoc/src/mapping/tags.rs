//! Tag visibility filtering.

use crate::config::TagSet;

/// Return `tags` without the ones named in `hide`, preserving order.
///
/// Matching ignores case and the leading `@`, so hiding `Exclude-Tag` also
/// hides `@exclude-tag` and `@EXCLUDE-TAG`.
///
/// # Examples
///
/// ```
/// use featuredoc::config::TagSet;
/// use featuredoc::mapping::visible_tags;
///
/// let tags = vec!["@feature-tag".to_string(), "@TagsToHideFeature".to_string()];
/// let hide = TagSet::parse("tagstohidefeature");
/// assert_eq!(visible_tags(&tags, &hide), vec!["@feature-tag".to_string()]);
/// ```
#[must_use]
pub fn visible_tags(tags: &[String], hide: &TagSet) -> Vec<String> {
    tags.iter()
        .filter(|tag| !hide.contains_tag(tag))
        .cloned()
        .collect()
}
