//! Parse tree consumed by the assembler.
//!
//! These types describe the output of a grammar-aware Gherkin parser: keyword
//! localization has already happened, steps carry their raw keyword text, and
//! every node knows its 1-based source position. Free-floating `#` comments
//! are not attached to any node; they arrive as a flat list on the
//! [`Document`]. The [`crate::source`] module produces this tree from feature
//! text, but any parser able to fill these structs can feed the assembler.

/// 1-based line and column of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Create a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The feature declared by the file.
    pub feature: FeatureNode,
    /// Every comment in the file, in source order.
    pub comments: Vec<CommentNode>,
}

/// A `#` comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    /// Comment text including the leading `#`.
    pub text: String,
    /// Where the comment starts.
    pub position: Position,
}

/// The `Feature:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureNode {
    /// Feature title.
    pub name: String,
    /// Free text between the title and the first child, if any.
    pub description: Option<String>,
    /// Tags in source order, each starting with `@`.
    pub tags: Vec<String>,
    /// Language code from the `# language:` header, if present.
    pub language: Option<String>,
    /// Feature-level background.
    pub background: Option<BackgroundNode>,
    /// Scenarios, outlines and other children in source order.
    pub children: Vec<FeatureChild>,
    /// Position of the `Feature:` keyword.
    pub position: Position,
}

/// A child of a feature. The background is held by
/// [`FeatureNode::background`] and never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureChild {
    /// A plain scenario.
    Scenario(ScenarioNode),
    /// A scenario outline with example tables.
    ScenarioOutline(OutlineNode),
    /// A `Rule:` block; the documentation model has no counterpart for it.
    Rule(RuleNode),
}

impl FeatureChild {
    /// Human-readable kind of the node, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scenario(_) => "Scenario",
            Self::ScenarioOutline(_) => "Scenario Outline",
            Self::Rule(_) => "Rule",
        }
    }

    /// Source position of the node keyword.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Scenario(node) => node.position,
            Self::ScenarioOutline(node) => node.position,
            Self::Rule(node) => node.position,
        }
    }

    /// Raw tags declared on the node; rules report none here.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Scenario(node) => &node.tags,
            Self::ScenarioOutline(node) => &node.tags,
            Self::Rule(_) => &[],
        }
    }
}

/// A `Background:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundNode {
    /// Optional title; empty when absent.
    pub name: String,
    /// Free text under the title.
    pub description: Option<String>,
    /// Steps in source order.
    pub steps: Vec<StepNode>,
    /// Position of the `Background:` keyword.
    pub position: Position,
}

/// A `Scenario:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioNode {
    /// Scenario title.
    pub name: String,
    /// Free text under the title.
    pub description: Option<String>,
    /// Tags in source order, each starting with `@`.
    pub tags: Vec<String>,
    /// Steps in source order.
    pub steps: Vec<StepNode>,
    /// Position of the `Scenario:` keyword.
    pub position: Position,
}

/// A `Scenario Outline:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Outline title.
    pub name: String,
    /// Free text under the title.
    pub description: Option<String>,
    /// Tags in source order, each starting with `@`.
    pub tags: Vec<String>,
    /// Step templates in source order.
    pub steps: Vec<StepNode>,
    /// `Examples:` blocks in source order.
    pub examples: Vec<ExamplesNode>,
    /// Position of the `Scenario Outline:` keyword.
    pub position: Position,
}

/// An `Examples:` block of an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplesNode {
    /// Optional title.
    pub name: Option<String>,
    /// Free text under the title.
    pub description: Option<String>,
    /// Tags in source order, each starting with `@`.
    pub tags: Vec<String>,
    /// Header row followed by data rows; never empty.
    pub rows: Vec<Vec<String>>,
    /// Position of the `Examples:` keyword.
    pub position: Position,
}

/// A `Rule:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    /// Rule title.
    pub name: String,
    /// Position of the `Rule:` keyword.
    pub position: Position,
}

/// A single step line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNode {
    /// Keyword as written, possibly with trailing whitespace.
    pub keyword: String,
    /// Step text after the keyword.
    pub text: String,
    /// Data table or doc string attached to the step.
    pub argument: Option<StepArgument>,
    /// Position of the keyword.
    pub position: Position,
}

/// Argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    /// Pipe-delimited table rows; never empty.
    DataTable(Vec<Vec<String>>),
    /// Content of a `"""` or ```` ``` ```` block.
    DocString(String),
}
