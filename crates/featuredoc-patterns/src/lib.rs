//! Text-level helpers shared by the featuredoc model builder.
//!
//! The crate holds the pieces that only look at strings: localized step
//! keyword tables, the reference-number matchers applied to source comments,
//! and the slug normalizer used for scenario identifiers. Everything here is
//! stateless apart from regexes compiled once on first use, so the values can
//! be shared freely between threads.

mod keyword;
mod reference;
mod slug;

pub use keyword::{KeywordTable, StepKeyword, StepKeywords, UnrecognizedKeyword};
pub use reference::{story_reference, theme_reference};
pub use slug::{NameNormalizer, Slugger, to_slug};
