//! Step mapping.

use super::FeatureMapper;
use super::table::map_table;
use crate::ast::{StepArgument, StepNode};
use crate::error::MapError;
use crate::model::Step;

impl FeatureMapper<'_> {
    /// Build a model step from a parsed step.
    ///
    /// The keyword is classified against the mapper's keyword sets; the data
    /// table or doc string argument, whichever the node has, is copied over.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnrecognizedKeyword`] when the keyword belongs to
    /// none of the sets.
    pub fn map_step(&self, node: &StepNode) -> Result<Step, MapError> {
        let keyword =
            self.keywords
                .classify(&node.keyword)
                .map_err(|err| MapError::UnrecognizedKeyword {
                    keyword: err.0,
                    line: node.position.line,
                })?;

        let (table, doc_string) = match &node.argument {
            Some(StepArgument::DataTable(rows)) => (Some(map_table(rows)), None),
            Some(StepArgument::DocString(text)) => (None, Some(text.clone())),
            None => (None, None),
        };

        Ok(Step {
            location: node.position.into(),
            keyword,
            native_keyword: node.keyword.clone(),
            name: node.text.clone(),
            table,
            doc_string,
            comments: Vec::new(),
        })
    }

    /// Build every step of a container, stopping at the first failure.
    pub(crate) fn map_steps(&self, nodes: &[StepNode]) -> Result<Vec<Step>, MapError> {
        nodes.iter().map(|node| self.map_step(node)).collect()
    }
}
