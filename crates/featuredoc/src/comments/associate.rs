//! Line-proximity association of comments with steps.

use tracing::trace;

use crate::model::{Comment, CommentType, FeatureElement};

/// Attach each comment to the step it belongs to and record how.
///
/// `comments` must be in ascending line order. For each comment the owner is
/// the last element starting above it. Inside the owner, the comment goes to
/// the first step below it as a [`CommentType::StepComment`]; when no step
/// follows, it goes to the owner's final step as a
/// [`CommentType::AfterLastStepComment`]. Comments without an owner, or whose
/// owner has no step above them, stay [`CommentType::Normal`].
///
/// The `kind` of every entry in `comments` is updated in place, and attached
/// comments are copied into the step's own list.
pub fn associate_comments(comments: &mut [Comment], elements: &mut [FeatureElement]) {
    for comment in comments.iter_mut() {
        let line = comment.location.line;
        let Some(owner) = elements.iter_mut().rev().find(|e| e.location().line < line) else {
            trace!(line, "comment precedes every feature element");
            continue;
        };
        let steps = &mut owner.core_mut().steps;

        if let Some(step) = steps.iter_mut().find(|s| s.location.line > line) {
            comment.kind = CommentType::StepComment;
            step.comments.push(comment.clone());
            continue;
        }

        let final_index = steps.len().checked_sub(1);
        let before = steps.iter().rposition(|s| s.location.line < line);
        match (before, final_index) {
            (Some(index), Some(last)) if index == last => {
                if let Some(step) = steps.get_mut(index) {
                    comment.kind = CommentType::AfterLastStepComment;
                    step.comments.push(comment.clone());
                }
            }
            _ => trace!(line, "comment has no step to attach to"),
        }
    }
}
