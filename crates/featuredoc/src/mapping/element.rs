//! Scenario, outline and background mapping.

use super::FeatureMapper;
use super::table::map_example_table;
use crate::ast::{BackgroundNode, ExamplesNode, FeatureChild, OutlineNode, ScenarioNode};
use crate::error::MapError;
use crate::model::{
    Background, ElementCore, Example, FeatureElement, Scenario, ScenarioOutline,
};

impl FeatureMapper<'_> {
    /// Build a scenario with hidden tags removed and a slug computed.
    ///
    /// # Errors
    ///
    /// Propagates step mapping failures.
    pub fn map_scenario(&self, node: &ScenarioNode) -> Result<Scenario, MapError> {
        Ok(Scenario {
            core: ElementCore {
                name: node.name.clone(),
                description: node.description.clone().unwrap_or_default(),
                location: node.position.into(),
                tags: self.visible_tags(&node.tags),
                steps: self.map_steps(&node.steps)?,
                feature: None,
            },
            slug: self.normalizer.normalize(&node.name),
        })
    }

    /// Build a scenario outline, including its example blocks.
    ///
    /// # Errors
    ///
    /// Propagates step mapping failures.
    pub fn map_outline(&self, node: &OutlineNode) -> Result<ScenarioOutline, MapError> {
        Ok(ScenarioOutline {
            core: ElementCore {
                name: node.name.clone(),
                description: node.description.clone().unwrap_or_default(),
                location: node.position.into(),
                tags: self.visible_tags(&node.tags),
                steps: self.map_steps(&node.steps)?,
                feature: None,
            },
            slug: self.normalizer.normalize(&node.name),
            examples: node.examples.iter().map(map_example).collect(),
        })
    }

    /// Build a background. Backgrounds have no tags and no slug.
    ///
    /// # Errors
    ///
    /// Propagates step mapping failures.
    pub fn map_background(&self, node: &BackgroundNode) -> Result<Background, MapError> {
        Ok(Background {
            core: ElementCore {
                name: node.name.clone(),
                description: node.description.clone().unwrap_or_default(),
                location: node.position.into(),
                tags: Vec::new(),
                steps: self.map_steps(&node.steps)?,
                feature: None,
            },
        })
    }

    /// Build the model element for a feature child.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnsupportedNode`] for children the model has no
    /// variant for, and propagates step mapping failures.
    pub fn map_feature_element(&self, child: &FeatureChild) -> Result<FeatureElement, MapError> {
        match child {
            FeatureChild::Scenario(node) => self.map_scenario(node).map(FeatureElement::Scenario),
            FeatureChild::ScenarioOutline(node) => {
                self.map_outline(node).map(FeatureElement::ScenarioOutline)
            }
            FeatureChild::Rule(_) => Err(MapError::UnsupportedNode {
                kind: child.kind(),
                line: child.position().line,
            }),
        }
    }
}

fn map_example(node: &ExamplesNode) -> Example {
    Example {
        name: node.name.clone(),
        description: node.description.clone(),
        tags: node.tags.clone(),
        table: map_example_table(&node.rows),
    }
}
