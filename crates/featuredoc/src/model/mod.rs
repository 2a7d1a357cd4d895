//! Documentation model built from a parsed feature file.
//!
//! The model is what rendering collaborators consume. It mirrors the shape of
//! the source document but adds what the parse tree does not know: keyword
//! categories, scenario slugs, comments attached to the steps they describe,
//! and tags derived from those comments.

mod element;
mod feature;
mod table;

pub use element::{Background, ElementCore, Example, FeatureElement, Scenario, ScenarioOutline};
pub use feature::{Feature, FeatureId};
pub use table::{ExampleCell, ExampleRow, ExampleTable, Table, TableRow, TestResult};

pub use featuredoc_patterns::StepKeyword;

use crate::ast::Position;

/// Line and column of a model node, used for ordering and proximity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl Location {
    /// Create a location from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<Position> for Location {
    fn from(position: Position) -> Self {
        Self::new(position.line, position.column)
    }
}

/// How a comment relates to the steps around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CommentType {
    /// Not attached to any step.
    #[default]
    Normal,
    /// Precedes the step it is attached to.
    StepComment,
    /// Follows the final step of a scenario.
    AfterLastStepComment,
}

/// A source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comment {
    /// Trimmed comment text including the leading `#`.
    pub text: String,
    /// Where the comment starts.
    pub location: Location,
    /// Relationship to the surrounding steps; starts as [`CommentType::Normal`].
    pub kind: CommentType,
}

impl Comment {
    /// Create an unattached comment.
    #[must_use]
    pub fn new(text: impl Into<String>, location: Location) -> Self {
        Self {
            text: text.into(),
            location,
            kind: CommentType::Normal,
        }
    }
}

/// A step of a scenario, outline or background.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step {
    /// Position of the keyword.
    pub location: Location,
    /// Keyword category.
    pub keyword: StepKeyword,
    /// Keyword exactly as written in the source.
    pub native_keyword: String,
    /// Step text after the keyword.
    pub name: String,
    /// Attached data table; never set together with `doc_string`.
    pub table: Option<Table>,
    /// Attached doc string; never set together with `table`.
    pub doc_string: Option<String>,
    /// Comments attached by the associator, in source order.
    pub comments: Vec<Comment>,
}
