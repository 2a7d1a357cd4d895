//! Parse `.feature` text into the tree the assembler consumes.
//!
//! Parsing is delegated to the `gherkin` crate. That parser discards `#`
//! comments and the `# language:` header, so both are recovered here with a
//! line scan over the same text. Doc string bodies are skipped by the scan:
//! a `#` inside `"""` or ```` ``` ```` is content, not a comment.

use std::path::Path;
use std::sync::LazyLock;

use gherkin::{GherkinEnv, LineCol};
use regex::Regex;

use crate::assembler::FeatureAssembler;
use crate::ast::{
    BackgroundNode, CommentNode, Document, ExamplesNode, FeatureChild, FeatureNode, OutlineNode,
    Position, RuleNode, ScenarioNode, StepArgument, StepNode,
};
use crate::error::SourceError;
use crate::model::Feature;

static LANGUAGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*([A-Za-z0-9_-]+)\s*$")
        .unwrap_or_else(|_| unreachable!("language header regex is valid"))
});

const DOC_STRING_DELIMITERS: [&str; 2] = ["\"\"\"", "```"];

/// Parse feature text into a [`Document`].
///
/// # Errors
///
/// Returns [`SourceError::UnsupportedLanguage`] when the `# language:` header
/// names a language the parser does not know, and [`SourceError::Parse`] when
/// the text is not valid Gherkin.
///
/// # Examples
///
/// ```
/// use featuredoc::source::parse_document;
///
/// let document = parse_document("Feature: Demo\n  # note\n  Scenario: s\n    Given a step\n")
///     .expect("valid feature");
/// assert_eq!(document.feature.name, "Demo");
/// assert_eq!(document.comments.len(), 1);
/// ```
pub fn parse_document(text: &str) -> Result<Document, SourceError> {
    let mut source = text.to_string();
    normalise_trailing_newline(&mut source);

    let header = language_header(&source);
    let env = match &header {
        Some((_, code)) => {
            GherkinEnv::new(code).map_err(|_| SourceError::UnsupportedLanguage(code.clone()))?
        }
        None => GherkinEnv::default(),
    };
    let parsed = gherkin::Feature::parse(source.as_str(), env)?;

    let header_line = header.as_ref().map(|(line, _)| *line);
    let language = header.map(|(_, code)| code);
    Ok(Document {
        feature: map_feature(&parsed, language),
        comments: scan_comments(&source, header_line),
    })
}

/// Read and parse a feature file.
///
/// # Errors
///
/// Returns [`SourceError::Read`] when the file cannot be read, otherwise the
/// errors of [`parse_document`].
pub fn parse_document_file(path: &Path) -> Result<Document, SourceError> {
    let text = std::fs::read_to_string(path)?;
    parse_document(&text)
}

/// Parse feature text and assemble it in one call.
///
/// # Errors
///
/// Returns parse errors from [`parse_document`] and assembly errors wrapped
/// in [`SourceError::Map`].
pub fn assemble_source(
    text: &str,
    assembler: &FeatureAssembler,
) -> Result<Option<Feature>, SourceError> {
    let document = parse_document(text)?;
    Ok(assembler.assemble(&document)?)
}

/// Read, parse and assemble a feature file.
///
/// # Errors
///
/// See [`parse_document_file`] and [`assemble_source`].
pub fn assemble_file(
    path: &Path,
    assembler: &FeatureAssembler,
) -> Result<Option<Feature>, SourceError> {
    let document = parse_document_file(path)?;
    Ok(assembler.assemble(&document)?)
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Find the `# language:` header among the leading comment and blank lines.
///
/// Returns the 1-based line of the header and the language code.
fn language_header(text: &str) -> Option<(usize, String)> {
    text.lines()
        .enumerate()
        .take_while(|(_, line)| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.starts_with('#')
        })
        .find_map(|(index, line)| {
            LANGUAGE_HEADER
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|code| (index + 1, code.as_str().to_string()))
        })
}

fn scan_comments(text: &str, header_line: Option<usize>) -> Vec<CommentNode> {
    let mut comments = Vec::new();
    let mut open_fence: Option<&str> = None;
    for (index, line) in text.lines().enumerate() {
        let content = line.trim_start();
        if let Some(fence) = open_fence {
            if content.starts_with(fence) {
                open_fence = None;
            }
            continue;
        }
        if let Some(fence) = DOC_STRING_DELIMITERS
            .into_iter()
            .find(|fence| content.starts_with(*fence))
        {
            open_fence = Some(fence);
            continue;
        }
        let number = index + 1;
        if !content.starts_with('#') || header_line == Some(number) {
            continue;
        }
        let indent = line.chars().count() - content.chars().count();
        comments.push(CommentNode {
            text: content.trim_end().to_string(),
            position: Position::new(number, indent + 1),
        });
    }
    comments
}

fn position(at: LineCol) -> Position {
    Position::new(at.line, at.col)
}

/// Treat blank text as absent.
///
/// Accepts both `String` and `Option<String>` so optional and mandatory
/// parser fields go through the same normalization.
fn optional_text(value: impl Into<Option<String>>) -> Option<String> {
    value
        .into()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn tag_names(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            if tag.starts_with('@') {
                tag.clone()
            } else {
                format!("@{tag}")
            }
        })
        .collect()
}

fn map_feature(feature: &gherkin::Feature, language: Option<String>) -> FeatureNode {
    let mut children: Vec<FeatureChild> = feature
        .scenarios
        .iter()
        .map(map_scenario)
        .chain(feature.rules.iter().map(|rule| {
            FeatureChild::Rule(RuleNode {
                name: optional_text(rule.name.clone()).unwrap_or_default(),
                position: position(rule.position),
            })
        }))
        .collect();
    children.sort_by_key(FeatureChild::position);

    FeatureNode {
        name: feature.name.clone(),
        description: optional_text(feature.description.clone()),
        tags: tag_names(&feature.tags),
        language,
        background: feature.background.as_ref().map(map_background),
        children,
        position: position(feature.position),
    }
}

fn map_background(background: &gherkin::Background) -> BackgroundNode {
    BackgroundNode {
        name: optional_text(background.name.clone()).unwrap_or_default(),
        description: optional_text(background.description.clone()),
        steps: background.steps.iter().map(map_step).collect(),
        position: position(background.position),
    }
}

fn map_scenario(scenario: &gherkin::Scenario) -> FeatureChild {
    let name = scenario.name.clone();
    let description = optional_text(scenario.description.clone());
    let tags = tag_names(&scenario.tags);
    let steps = scenario.steps.iter().map(map_step).collect();
    let at = position(scenario.position);

    if scenario.examples.is_empty() {
        return FeatureChild::Scenario(ScenarioNode {
            name,
            description,
            tags,
            steps,
            position: at,
        });
    }
    FeatureChild::ScenarioOutline(OutlineNode {
        name,
        description,
        tags,
        steps,
        examples: scenario.examples.iter().filter_map(map_examples).collect(),
        position: at,
    })
}

/// Example blocks without a table carry no rows and are dropped.
fn map_examples(examples: &gherkin::Examples) -> Option<ExamplesNode> {
    let rows = examples.table.as_ref().map(|table| table.rows.clone())?;
    if rows.is_empty() {
        return None;
    }
    Some(ExamplesNode {
        name: optional_text(examples.name.clone()),
        description: optional_text(examples.description.clone()),
        tags: tag_names(&examples.tags),
        rows,
        position: position(examples.position),
    })
}

fn map_step(step: &gherkin::Step) -> StepNode {
    let argument = match (&step.table, &step.docstring) {
        (Some(table), _) if !table.rows.is_empty() => {
            Some(StepArgument::DataTable(table.rows.clone()))
        }
        (_, Some(text)) => Some(StepArgument::DocString(text.clone())),
        _ => None,
    };
    StepNode {
        keyword: step.keyword.clone(),
        text: step.value.clone(),
        argument,
        position: position(step.position),
    }
}
