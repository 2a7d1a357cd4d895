//! Source comment handling.
//!
//! The parser reports comments as a flat list. [`associate_comments`] pins
//! each one to the step it documents using line numbers alone, and
//! [`derive_reference_tags`] turns theme and story numbers found in those
//! comments into tags on the scenario they belong to.

mod associate;
mod derive;

pub use associate::associate_comments;
pub use derive::{CommentReferences, derive_reference_tags};
