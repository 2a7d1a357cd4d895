//! Theme and story tags derived from comment text.

use featuredoc_patterns::{story_reference, theme_reference};
use tracing::trace;

use crate::config::TagSet;
use crate::model::{Comment, CommentType, ElementCore, FeatureElement};

/// Theme and story numbers found in one comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentReferences {
    /// Normalized theme number, hyphens already replaced by underscores.
    pub theme: Option<String>,
    /// Story digits.
    pub story: Option<String>,
}

impl CommentReferences {
    /// Scan comment text for a theme and a story reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc::comments::CommentReferences;
    ///
    /// let refs = CommentReferences::scan("#24.01.00 RI:102069-03 (B-12010) enter specflow");
    /// assert_eq!(refs.theme_tag().as_deref(), Some("@T_102069_03"));
    /// assert_eq!(refs.story_tag().as_deref(), Some("@B_12010"));
    /// ```
    #[must_use]
    pub fn scan(text: &str) -> Self {
        Self {
            theme: theme_reference(text),
            story: story_reference(text).map(str::to_string),
        }
    }

    /// The `@T_<theme>` tag, if a theme was found.
    #[must_use]
    pub fn theme_tag(&self) -> Option<String> {
        self.theme.as_ref().map(|theme| format!("@T_{theme}"))
    }

    /// The `@B_<story>` tag, if a story was found.
    #[must_use]
    pub fn story_tag(&self) -> Option<String> {
        self.story.as_ref().map(|story| format!("@B_{story}"))
    }

    /// Add the derived tags to `core` unless they are already present.
    ///
    /// A story counts as present when either `@B_<digits>` or the legacy
    /// spelling `@B<digits>` is tagged. Tags matching `hide` are not added;
    /// they are returned instead so they can still drive exclusion.
    pub fn apply(&self, core: &mut ElementCore, hide: &TagSet) -> Vec<String> {
        let mut hidden = Vec::new();
        if let Some(tag) = self.theme_tag() {
            place_tag(core, tag, hide, &mut hidden, "derived theme tag");
        }
        if let Some(story) = &self.story {
            let legacy = format!("@B{story}");
            if !core.has_tag(&legacy) {
                place_tag(core, format!("@B_{story}"), hide, &mut hidden, "derived story tag");
            }
        }
        hidden
    }
}

fn place_tag(
    core: &mut ElementCore,
    tag: String,
    hide: &TagSet,
    hidden: &mut Vec<String>,
    message: &'static str,
) {
    if hide.contains_tag(&tag) {
        trace!(element = %core.name, tag = %tag, "derived tag hidden");
        hidden.push(tag);
    } else if core.add_tag(tag) {
        trace!(element = %core.name, tag = ?core.tags.last(), "{message}");
    }
}

/// Add theme and story tags from comments to every element, in order.
///
/// Each element scans, in this order:
///
/// 1. for the first element only, the unattached comments above it;
/// 2. the comments trailing the previous element's final step;
/// 3. the comments on its own steps, except trailing ones.
///
/// Comments must already have been associated with steps. Derived tags
/// matching `hide` stay off the elements; the returned list holds them per
/// element, in element order.
pub fn derive_reference_tags(
    elements: &mut [FeatureElement],
    feature_comments: &[Comment],
    hide: &TagSet,
) -> Vec<Vec<String>> {
    let mut hidden = Vec::with_capacity(elements.len());
    let mut previous: Option<usize> = None;
    for index in 0..elements.len() {
        let references: Vec<CommentReferences> = {
            let Some(current) = elements.get(index) else {
                continue;
            };
            let before = previous.and_then(|p| elements.get(p));
            candidate_comments(before, current, feature_comments)
                .into_iter()
                .map(|comment| CommentReferences::scan(&comment.text))
                .collect()
        };
        let mut element_hidden = Vec::new();
        if let Some(current) = elements.get_mut(index) {
            let core = current.core_mut();
            for refs in &references {
                element_hidden.extend(refs.apply(core, hide));
            }
        }
        hidden.push(element_hidden);
        previous = Some(index);
    }
    hidden
}

fn candidate_comments<'a>(
    previous: Option<&'a FeatureElement>,
    current: &'a FeatureElement,
    feature_comments: &'a [Comment],
) -> Vec<&'a Comment> {
    let mut candidates = Vec::new();
    let start = current.location().line;

    match previous {
        None => candidates.extend(
            feature_comments
                .iter()
                .take_while(|c| c.kind == CommentType::Normal && c.location.line < start),
        ),
        Some(prev) => {
            if let Some(last) = prev.steps().last() {
                candidates.extend(
                    last.comments
                        .iter()
                        .filter(|c| c.kind == CommentType::AfterLastStepComment),
                );
            }
        }
    }

    candidates.extend(
        current
            .steps()
            .iter()
            .flat_map(|step| &step.comments)
            .filter(|c| c.kind != CommentType::AfterLastStepComment),
    );
    candidates
}
