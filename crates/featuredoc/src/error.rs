//! Error types for model assembly, configuration and source parsing.
//!
//! Tag-based exclusion is not an error: an excluded feature is reported as
//! `Ok(None)` by the assembler. Everything here aborts the current document.

use thiserror::Error;

/// Errors raised while turning a parse tree into the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A step keyword is in none of the language's keyword sets.
    #[error("unrecognized step keyword '{keyword}' at line {line}")]
    UnrecognizedKeyword {
        /// The trimmed keyword text.
        keyword: String,
        /// Line of the offending step.
        line: usize,
    },

    /// The parse tree contains a node kind the model cannot represent.
    #[error("unsupported feature element '{kind}' at line {line}")]
    UnsupportedNode {
        /// Kind of the node, such as `Rule`.
        kind: &'static str,
        /// Line of the node keyword.
        line: usize,
    },
}

/// Errors raised while reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting holds a value outside its accepted range.
    #[error("invalid value '{value}' for {key}, expected {expected}")]
    InvalidValue {
        /// Name of the setting.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// Description of the accepted values.
        expected: &'static str,
    },
}

/// Errors raised while parsing feature text into a parse tree.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The feature file could not be read.
    #[error("failed to read feature file: {0}")]
    Read(#[from] std::io::Error),

    /// The text is not valid Gherkin.
    #[error("failed to parse feature file: {0}")]
    Parse(#[from] gherkin::ParseError),

    /// The `# language:` header names a language the parser does not know.
    #[error("unsupported feature language: {0}")]
    UnsupportedLanguage(String),

    /// The parsed document could not be assembled.
    #[error(transparent)]
    Map(#[from] MapError),
}
